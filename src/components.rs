//! Yew view components for the course site.
//!
//! Most of these are stateless and render from props; the counter and lazy
//! image own a visibility observer.

use crate::hooks::use_visibility;
use course_site::catalog::Course;
use course_site::config::{COUNTER_ROOT_MARGIN, COUNTER_TICK_MS, COUNTER_VISIBILITY_THRESHOLD};
use course_site::counter::CounterAnimation;
use course_site::notification::{Notification, NotificationId};
use course_site::page::{LazyImageState, NavMenu, SubmitButtonState};
use course_site::report::{error_slot_id, FieldErrorView};
use course_site::storage::Theme;
use gloo_timers::callback::Interval;
use log::debug;
use web_sys::{ScrollBehavior, ScrollIntoViewOptions, ScrollLogicalPosition};
use yew::prelude::*;

/// Smoothly scroll an in-page anchor (`#section`) into view.
///
/// Anchors without a matching element are ignored.
pub fn scroll_to_anchor(href: &str) {
    let target = match gloo_utils::document().query_selector(href) {
        Ok(Some(el)) => el,
        _ => {
            debug!("no scroll target for '{}'", href);
            return;
        }
    };
    let options = ScrollIntoViewOptions::new();
    options.set_behavior(ScrollBehavior::Smooth);
    options.set_block(ScrollLogicalPosition::Start);
    target.scroll_into_view_with_scroll_into_view_options(&options);
}

const NAV_LINKS: &[(&str, &str)] = &[
    ("#home", "Home"),
    ("#courses", "Courses"),
    ("#stats", "About"),
    ("#contact", "Contact"),
];

/// Site navigation with the mobile hamburger menu.
#[function_component(Navbar)]
pub fn navbar() -> Html {
    let menu = use_state(NavMenu::default);

    let on_hamburger = {
        let menu = menu.clone();
        Callback::from(move |_: MouseEvent| menu.set(menu.toggled()))
    };

    html! {
        <nav class="navbar">
            <a class="nav-logo" href="#home">{ "LearnHub" }</a>
            <ul class={menu.class("nav-menu")}>
                { NAV_LINKS.iter().map(|&(href, label)| {
                    let menu = menu.clone();
                    let onclick = Callback::from(move |e: MouseEvent| {
                        e.prevent_default();
                        menu.set(NavMenu::Closed);
                        scroll_to_anchor(href);
                    });
                    html! {
                        <li class="nav-item">
                            <a class="nav-link" {href} {onclick}>{ label }</a>
                        </li>
                    }
                }).collect::<Html>() }
            </ul>
            <div class={menu.class("hamburger")} onclick={on_hamburger}>
                <span class="bar"></span>
                <span class="bar"></span>
                <span class="bar"></span>
            </div>
        </nav>
    }
}

/// Inline error text for one form field.
#[derive(Properties, PartialEq)]
pub struct FieldErrorProps {
    pub field_id: AttrValue,
    pub view: FieldErrorView,
}

#[function_component(FieldError)]
pub fn field_error(props: &FieldErrorProps) -> Html {
    html! {
        <span id={error_slot_id(&props.field_id)}
              class="error-message"
              hidden={!props.view.is_visible()}>
            { props.view.message.clone() }
        </span>
    }
}

/// Submit button that shows a busy label while its debounce runs.
#[derive(Properties, PartialEq)]
pub struct SubmitButtonProps {
    pub label: AttrValue,
    pub state: SubmitButtonState,
}

#[function_component(SubmitButton)]
pub fn submit_button(props: &SubmitButtonProps) -> Html {
    html! {
        <button type="submit" class="btn btn-primary" disabled={props.state.disabled()}>
            { props.state.label(&props.label).to_string() }
        </button>
    }
}

/// The toast in the top-right corner.
#[derive(Properties, PartialEq)]
pub struct ToastProps {
    pub notification: Option<Notification>,
    pub on_close: Callback<NotificationId>,
}

#[function_component(Toast)]
pub fn toast(props: &ToastProps) -> Html {
    let Some(n) = &props.notification else {
        return html! {};
    };
    let onclick = {
        let id = n.id;
        props.on_close.reform(move |_: MouseEvent| id)
    };
    html! {
        // Keyed so a replacement mounts fresh and replays the slide-in.
        <div key={n.id.to_string()} class={classes!(n.kind.class(), n.phase.animation_class())} role="status">
            <span>{ n.message.clone() }</span>
            <button class="notification-close" aria-label="Close" {onclick}>{ "\u{00d7}" }</button>
        </div>
    }
}

/// Floating light/dark switch.
#[derive(Properties, PartialEq)]
pub struct DarkModeToggleProps {
    pub theme: Theme,
    pub on_toggle: Callback<()>,
}

#[function_component(DarkModeToggle)]
pub fn dark_mode_toggle(props: &DarkModeToggleProps) -> Html {
    let onclick = props.on_toggle.reform(|_: MouseEvent| ());
    html! {
        <button class="dark-mode-toggle" aria-label="Toggle dark mode" {onclick}>
            <i class={props.theme.toggle_icon()}></i>
        </button>
    }
}

/// Statistic that counts up the first time it scrolls into view.
#[derive(Properties, PartialEq)]
pub struct StatCounterProps {
    pub value: AttrValue,
    pub label: AttrValue,
}

#[function_component(StatCounter)]
pub fn stat_counter(props: &StatCounterProps) -> Html {
    let node = use_node_ref();
    let text = use_state(|| props.value.to_string());
    let visible = use_visibility(
        node.clone(),
        COUNTER_VISIBILITY_THRESHOLD,
        Some(COUNTER_ROOT_MARGIN),
    );

    let ticker = use_mut_ref(|| None::<Interval>);

    {
        let text = text.clone();
        let value = props.value.clone();
        use_effect_with(visible, move |visible| {
            if *visible {
                if let Some(mut anim) = CounterAnimation::parse(&value) {
                    let slot = ticker.clone();
                    let handle = Interval::new(COUNTER_TICK_MS, move || {
                        let frame = anim.tick();
                        text.set(frame.text);
                        if frame.done {
                            // Stop once the final text is shown.
                            let finished = slot.borrow_mut().take();
                            drop(finished);
                        }
                    });
                    *ticker.borrow_mut() = Some(handle);
                }
            }
            move || {
                ticker.borrow_mut().take();
            }
        });
    }

    html! {
        <div class="stat-item">
            <h3 ref={node}>{ (*text).clone() }</h3>
            <p>{ props.label.clone() }</p>
        </div>
    }
}

/// Image that only receives its source once it is about to be seen.
#[derive(Properties, PartialEq)]
pub struct LazyImageProps {
    pub src: AttrValue,
    pub alt: AttrValue,
}

#[function_component(LazyImage)]
pub fn lazy_image(props: &LazyImageProps) -> Html {
    let node = use_node_ref();
    let visible = use_visibility(node.clone(), 0.0, None);
    let state = if visible {
        LazyImageState::Loaded
    } else {
        LazyImageState::Pending
    };

    html! {
        <img ref={node}
             class={state.class()}
             src={state.src(&props.src).map(|s| AttrValue::from(s.to_string()))}
             data-src={props.src.clone()}
             alt={props.alt.clone()} />
    }
}

/// One course in the catalog grid.
#[derive(Properties, PartialEq)]
pub struct CourseCardProps {
    pub course: Course,
    pub on_enroll: Callback<String>,
}

#[function_component(CourseCard)]
pub fn course_card(props: &CourseCardProps) -> Html {
    let course = &props.course;
    let onclick = {
        let title = course.title.clone();
        props.on_enroll.reform(move |e: MouseEvent| {
            e.prevent_default();
            title.clone()
        })
    };
    html! {
        <div class="course-card fade-in-up" data-category={course.category.clone()}>
            <h3>{ course.title.clone() }</h3>
            <p class="course-meta">{ format!("{} · {}", course.level, course.duration) }</p>
            <p>{ course.description.clone() }</p>
            <a href="#" class="btn btn-primary" {onclick}>{ "Enroll Now" }</a>
        </div>
    }
}
