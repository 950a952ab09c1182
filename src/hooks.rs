//! Custom hooks for timers, visibility observers and notifications.

use course_site::config::{DISMISS_ANIMATION_MS, NOTIFICATION_DURATION_MS};
use course_site::notification::{Notification, NotificationCenter, NotificationId, NotificationKind, Notifier};
use course_site::page::SubmitButtonState;
use gloo_timers::callback::Timeout;
use log::{debug, warn};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Element, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit};
use yew::prelude::*;

/// `(message, kind)` as emitted to the notification host.
pub type NotifyCallback = Callback<(String, NotificationKind)>;

/// Collects notifications raised while form state is borrowed, so they can
/// be emitted once the borrow is released.
#[derive(Default)]
pub struct QueuedNotifier {
    queue: Vec<(String, NotificationKind)>,
}

impl QueuedNotifier {
    pub fn flush(self, notify: &NotifyCallback) {
        for item in self.queue {
            notify.emit(item);
        }
    }
}

impl Notifier for QueuedNotifier {
    fn notify(&mut self, message: &str, kind: NotificationKind) {
        self.queue.push((message.to_string(), kind));
    }
}

/// Holds the state and callbacks of the page's notification host.
#[derive(Clone)]
pub struct NotificationHost {
    /// The notification on screen, if any.
    pub current: Option<Notification>,
    /// Show a new notification, replacing the current one.
    pub notify: NotifyCallback,
    /// User pressed the close button.
    pub dismiss: Callback<NotificationId>,
}

type TimerSlot = Rc<RefCell<Option<Timeout>>>;

/// Run the exit animation, then detach the element if it is still current.
fn schedule_detach(
    center: Rc<RefCell<NotificationCenter>>,
    slot: TimerSlot,
    redraw: UseForceUpdateHandle,
    id: NotificationId,
) {
    let handle = Timeout::new(DISMISS_ANIMATION_MS, move || {
        let detached = center.borrow_mut().detach(id);
        if detached {
            redraw.force_update();
        }
    });
    *slot.borrow_mut() = Some(handle);
}

/// Owns the single live notification and its dismiss timers.
#[hook]
pub fn use_notification_host() -> NotificationHost {
    let center = use_mut_ref(NotificationCenter::default);
    let auto_timer: TimerSlot = use_mut_ref(|| None::<Timeout>);
    let detach_timer: TimerSlot = use_mut_ref(|| None::<Timeout>);
    let redraw = use_force_update();

    let notify = {
        let center = center.clone();
        let auto_timer = auto_timer.clone();
        let detach_timer = detach_timer.clone();
        let redraw = redraw.clone();
        use_callback((), move |(message, kind): (String, NotificationKind), _| {
            let id = center.borrow_mut().show(&message, kind);
            // The superseded element is gone; its exit timer must not fire.
            detach_timer.borrow_mut().take();

            let center_t = center.clone();
            let detach_t = detach_timer.clone();
            let redraw_t = redraw.clone();
            let handle = Timeout::new(NOTIFICATION_DURATION_MS, move || {
                let expired = center_t.borrow_mut().expire(id);
                if expired {
                    debug!("notification {} expired", id);
                    redraw_t.force_update();
                    schedule_detach(center_t.clone(), detach_t.clone(), redraw_t.clone(), id);
                }
            });
            *auto_timer.borrow_mut() = Some(handle);
            redraw.force_update();
        })
    };

    let dismiss = {
        let center = center.clone();
        let auto_timer = auto_timer.clone();
        let detach_timer = detach_timer.clone();
        let redraw = redraw.clone();
        use_callback((), move |id: NotificationId, _| {
            let leaving = center.borrow_mut().dismiss(id);
            if leaving {
                // Cancel the auto-dismiss so it cannot remove the element twice.
                auto_timer.borrow_mut().take();
                redraw.force_update();
                schedule_detach(center.clone(), detach_timer.clone(), redraw.clone(), id);
            }
        })
    };

    let current = center.borrow().current().cloned();
    NotificationHost {
        current,
        notify,
        dismiss,
    }
}

/// Busy state for a submit control; `start` flips it busy for `busy_ms`.
#[hook]
pub fn use_busy_button(busy_ms: u32) -> (SubmitButtonState, Callback<()>) {
    let state = use_state(SubmitButtonState::default);
    let timer = use_mut_ref(|| None::<Timeout>);

    let start = {
        let state = state.clone();
        Callback::from(move |_: ()| {
            state.set(SubmitButtonState::Busy);
            let state = state.clone();
            let handle = Timeout::new(busy_ms, move || state.set(SubmitButtonState::Ready));
            *timer.borrow_mut() = Some(handle);
        })
    };

    (*state, start)
}

/// Whether the referenced element has entered the viewport.
///
/// Latches to `true` the first time the element intersects and stops
/// observing it afterwards. Elements that never mount stay `false`.
#[hook]
pub fn use_visibility(node: NodeRef, threshold: f64, root_margin: Option<&'static str>) -> bool {
    let seen = use_state(|| false);

    {
        let seen = seen.clone();
        use_effect_with(node, move |node| {
            let on_entries = Closure::<dyn FnMut(js_sys::Array, IntersectionObserver)>::new(
                move |entries: js_sys::Array, observer: IntersectionObserver| {
                    for entry in entries.iter() {
                        let entry: IntersectionObserverEntry = entry.unchecked_into();
                        if entry.is_intersecting() {
                            seen.set(true);
                            observer.unobserve(&entry.target());
                        }
                    }
                },
            );

            let mut observer = None;
            if let Some(element) = node.cast::<Element>() {
                let options = IntersectionObserverInit::new();
                options.set_threshold(&JsValue::from_f64(threshold));
                if let Some(margin) = root_margin {
                    options.set_root_margin(margin);
                }
                match IntersectionObserver::new_with_options(on_entries.as_ref().unchecked_ref(), &options) {
                    Ok(obs) => {
                        obs.observe(&element);
                        observer = Some(obs);
                    }
                    Err(e) => warn!("IntersectionObserver unavailable: {:?}", e),
                }
            }

            move || {
                if let Some(obs) = observer {
                    obs.disconnect();
                }
                drop(on_entries);
            }
        });
    }

    *seen
}
