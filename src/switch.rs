//! Calendar sync switch core
//!
//! One `CalendarSwitch` tracks the optimistic on/off state for one external
//! calendar connection, issues the remote enable/disable request, and
//! reconciles on settlement. Grouped switches force their siblings off
//! through the shared `GroupBus` when they turn on.

use crate::availability::{AvailabilityClient, SelectedCalendarPayload};
use crate::cache::{invalidate_after_settle, QueryCache};
use crate::error::{AppError, AppResult};
use crate::group::{GroupBus, GroupSubscription};
use crate::models::{GroupToggleSignal, SwitchProps, ToggleState};
use crate::notify::{notify_toggle_failure, Notifier};
use crate::ui_state::SwitchSnapshot;
use crate::utils::logging::{log_group_force_off, log_toggle_settled};
use chrono::{DateTime, Utc};
use log::debug;
use std::sync::{Arc, Mutex};

/// Collaborators shared by every switch on the page.
#[derive(Clone)]
pub struct SwitchContext {
    pub api: Arc<AvailabilityClient>,
    pub cache: Arc<dyn QueryCache>,
    pub notifier: Arc<dyn Notifier>,
    /// Present when the page hosts grouped switches.
    pub group_bus: Option<Arc<GroupBus>>,
}

struct SharedState {
    toggle: ToggleState,
    last_settled_at: Option<DateTime<Utc>>,
}

/// One toggle control bound to one external calendar connection.
///
/// All mutation happens from the host's UI task; the state cell is shared
/// only so the group listener can read the latest value without the switch
/// re-registering on every change.
pub struct CalendarSwitch {
    props: SwitchProps,
    state: Arc<Mutex<SharedState>>,
    ctx: SwitchContext,
    // Deregisters the group listener when the switch is dropped.
    _group_subscription: Option<GroupSubscription>,
}

impl CalendarSwitch {
    pub fn new(props: SwitchProps, ctx: SwitchContext) -> AppResult<Self> {
        props
            .validate()
            .map_err(|e| AppError::invalid_input(e.to_string()))?;

        let state = Arc::new(Mutex::new(SharedState {
            toggle: ToggleState::from_initial(props.is_checked),
            last_settled_at: None,
        }));

        let group_subscription = match (&props.group_id, &ctx.group_bus) {
            (Some(group_id), Some(bus)) => Some(Self::listen_for_group_toggles(
                bus,
                group_id.clone(),
                props.unique_id.clone(),
                Arc::clone(&state),
            )),
            _ => None,
        };

        Ok(Self {
            props,
            state,
            ctx,
            _group_subscription: group_subscription,
        })
    }

    /// User-level wrapper: never event-scoped. Type-constraining only.
    pub fn user_level(props: SwitchProps, ctx: SwitchContext) -> AppResult<Self> {
        Self::new(props.user_level(), ctx)
    }

    /// Event-scoped wrapper: bound to one event type. Type-constraining only.
    pub fn event_scoped(
        props: SwitchProps,
        event_type_id: i64,
        ctx: SwitchContext,
    ) -> AppResult<Self> {
        Self::new(props.event_scoped(event_type_id), ctx)
    }

    fn listen_for_group_toggles(
        bus: &Arc<GroupBus>,
        group_id: String,
        unique_id: String,
        state: Arc<Mutex<SharedState>>,
    ) -> GroupSubscription {
        bus.subscribe(Box::new(move |signal: &GroupToggleSignal| {
            if signal.group_id != group_id {
                return;
            }
            if signal.unique_id == unique_id {
                return; // never self-deactivate
            }
            let mut state = state.lock().unwrap();
            if !state.toggle.is_on() {
                return;
            }
            // Local reconciliation only. The switch that turned on owns the
            // remote effect; no disable request is issued for this one.
            state.toggle.force_off();
            log_group_force_off(&group_id, &unique_id);
        }))
    }

    /// Drive the toggle to `is_on`.
    ///
    /// Inert while the `disabled` prop is set or a request is in flight.
    /// State flips optimistically before the request is issued; both cache
    /// regions are invalidated once it settles. On failure the state has
    /// already rolled back to off and the toast has fired by the time the
    /// error reaches the caller.
    pub async fn set_checked(&self, is_on: bool) -> AppResult<()> {
        {
            let state = self.state.lock().unwrap();
            if self.props.disabled || state.toggle.in_flight() {
                debug!(
                    "[Switch] '{}' is inert, ignoring toggle",
                    self.props.external_id
                );
                return Ok(());
            }
        }

        // Grouped switches announce before flipping so siblings turn off
        // first. Our own listener skips the signal by unique_id.
        if is_on {
            if let (Some(group_id), Some(bus)) = (&self.props.group_id, &self.ctx.group_bus) {
                bus.broadcast(&GroupToggleSignal {
                    group_id: group_id.clone(),
                    unique_id: self.props.unique_id.clone(),
                });
            }
        }

        // Optimistic: the UI never waits on the network to reflect the
        // user's action.
        self.state.lock().unwrap().toggle.begin(is_on);

        let payload = SelectedCalendarPayload::from_props(&self.props);
        let result = if is_on {
            self.ctx.api.add_selected_calendar(&payload).await
        } else {
            self.ctx.api.remove_selected_calendar(&payload).await
        };

        // Dependent views refetch regardless of the outcome.
        invalidate_after_settle(self.ctx.cache.as_ref());

        let mut state = self.state.lock().unwrap();
        state.last_settled_at = Some(Utc::now());
        match result {
            Ok(()) => {
                state.toggle.settle_success();
                log_toggle_settled(&self.props.title, is_on, true);
                Ok(())
            }
            Err(err) => {
                state.toggle.rollback();
                drop(state);
                log_toggle_settled(&self.props.title, is_on, false);
                notify_toggle_failure(self.ctx.notifier.as_ref(), &self.props.title);
                Err(err)
            }
        }
    }

    pub fn props(&self) -> &SwitchProps {
        &self.props
    }

    pub fn is_checked(&self) -> bool {
        self.state.lock().unwrap().toggle.is_on()
    }

    pub fn is_pending(&self) -> bool {
        self.state.lock().unwrap().toggle.in_flight()
    }

    /// Render contract for the visual widget collaborator.
    pub fn snapshot(&self) -> SwitchSnapshot {
        let state = self.state.lock().unwrap();
        let in_flight = state.toggle.in_flight();
        SwitchSnapshot {
            id: self.props.external_id.clone(),
            label: self.props.name.clone(),
            checked: state.toggle.is_on(),
            disabled: self.props.disabled || in_flight,
            spinner: in_flight,
            destination: self.props.destination,
            last_settled_at: state.last_settled_at,
        }
    }
}
