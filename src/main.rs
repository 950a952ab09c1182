//! Main module for the course site using Yew.
//! Wires UI components, page state and persisted preferences.

use course_site::catalog::{
    categories, enrollment_message, filter_courses, read_courses_from_csv_string, CategoryFilter,
};
use course_site::config::{DARK_MODE_CLASS, SUBMIT_BUSY_MS};
use course_site::form::{submit_newsletter, FormController, SubmitOutcome};
use course_site::notification::NotificationKind;
use course_site::report::ErrorSlots;
use course_site::storage::{open_default_store, KeyValueStore, ThemePreference};
use course_site::FieldValue;
use log::{info, warn};
use std::rc::Rc;
use web_sys::{HtmlInputElement, HtmlSelectElement, HtmlTextAreaElement};
use yew::prelude::*;

mod components;
mod hooks;

use components::{
    CourseCard, DarkModeToggle, FieldError, LazyImage, Navbar, StatCounter, SubmitButton, Toast,
};
use hooks::{use_busy_button, use_notification_host, NotifyCallback, QueuedNotifier};

// ──────────────────────────────────────────────────────────────────────────────
// Page context

/// What page sections need from the page: the persisted store and a way to
/// raise notifications. Passed down explicitly instead of reaching for globals.
#[derive(Clone)]
pub struct PageContext {
    pub store: Rc<dyn KeyValueStore>,
    pub notify: NotifyCallback,
}

impl PartialEq for PageContext {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.store, &other.store) && self.notify == other.notify
    }
}

#[derive(Properties, PartialEq)]
pub struct SectionProps {
    pub page: PageContext,
}

const SUBJECTS: &[(&str, &str)] = &[
    ("", "Select a subject"),
    ("general", "General Inquiry"),
    ("courses", "Course Information"),
    ("support", "Technical Support"),
    ("partnership", "Partnership"),
];

// ──────────────────────────────────────────────────────────────────────────────
// Contact form

#[function_component(ContactForm)]
fn contact_form(props: &SectionProps) -> Html {
    let controller = {
        let store = props.page.store.clone();
        use_mut_ref(move || {
            let mut controller = FormController::contact(store);
            controller.restore();
            controller
        })
    };
    let errors = use_mut_ref(ErrorSlots::default);
    let redraw = use_force_update();
    let (button_state, start_busy) = use_busy_button(SUBMIT_BUSY_MS);

    let on_value = {
        let controller = controller.clone();
        let errors = errors.clone();
        let redraw = redraw.clone();
        Callback::from(move |(field_id, value): (&'static str, FieldValue)| {
            controller
                .borrow_mut()
                .input(field_id, value, &mut *errors.borrow_mut());
            redraw.force_update();
        })
    };

    let on_blur = {
        let controller = controller.clone();
        let errors = errors.clone();
        let redraw = redraw.clone();
        Callback::from(move |field_id: &'static str| {
            controller.borrow_mut().blur(field_id, &mut *errors.borrow_mut());
            redraw.force_update();
        })
    };

    let onsubmit = {
        let controller = controller.clone();
        let errors = errors.clone();
        let redraw = redraw.clone();
        let notify = props.page.notify.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            start_busy.emit(());
            let mut notifier = QueuedNotifier::default();
            let outcome = controller
                .borrow_mut()
                .submit(&mut *errors.borrow_mut(), &mut notifier);
            if outcome == SubmitOutcome::Invalid {
                info!("contact form has errors");
            }
            notifier.flush(&notify);
            redraw.force_update();
        })
    };

    let controller = controller.borrow();
    let errors = errors.borrow();
    let text_of = |id: &str| {
        controller
            .value(id)
            .map(|v| v.text().to_string())
            .unwrap_or_default()
    };
    let input_class = |id: &str| classes!("form-control", errors.indicator(id).class());
    let text_input = |id: &'static str| {
        on_value.reform(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            (id, FieldValue::Text(input.value()))
        })
    };
    let blur = |id: &'static str| on_blur.reform(move |_: FocusEvent| id);

    html! {
        <form id="contactForm" class="contact-form" novalidate={true} {onsubmit}>
            <div class="form-group">
                <label for="name">{ "Full Name *" }</label>
                <input type="text" id="name" class={input_class("name")}
                       value={text_of("name")} oninput={text_input("name")} onblur={blur("name")} />
                <FieldError field_id="name" view={errors.view("name")} />
            </div>
            <div class="form-group">
                <label for="email">{ "Email Address *" }</label>
                <input type="email" id="email" class={input_class("email")}
                       value={text_of("email")} oninput={text_input("email")} onblur={blur("email")} />
                <FieldError field_id="email" view={errors.view("email")} />
            </div>
            <div class="form-group">
                <label for="phone">{ "Phone Number" }</label>
                <input type="tel" id="phone" class={input_class("phone")}
                       value={text_of("phone")} oninput={text_input("phone")} onblur={blur("phone")} />
                <FieldError field_id="phone" view={errors.view("phone")} />
            </div>
            <div class="form-group">
                <label for="subject">{ "Subject *" }</label>
                <select id="subject" class={input_class("subject")}
                        oninput={on_value.reform(|e: InputEvent| {
                            let select: HtmlSelectElement = e.target_unchecked_into();
                            ("subject", FieldValue::Text(select.value()))
                        })}
                        onblur={blur("subject")}>
                    { SUBJECTS.iter().map(|&(value, label)| html! {
                        <option {value} selected={text_of("subject") == value}>{ label }</option>
                    }).collect::<Html>() }
                </select>
                <FieldError field_id="subject" view={errors.view("subject")} />
            </div>
            <div class="form-group">
                <label for="message">{ "Message *" }</label>
                <textarea id="message" rows="5" class={input_class("message")}
                          value={text_of("message")}
                          oninput={on_value.reform(|e: InputEvent| {
                              let area: HtmlTextAreaElement = e.target_unchecked_into();
                              ("message", FieldValue::Text(area.value()))
                          })}
                          onblur={blur("message")} />
                <FieldError field_id="message" view={errors.view("message")} />
            </div>
            <div class="form-group checkbox-group">
                <input type="checkbox" id="terms" class={input_class("terms")}
                       checked={controller.value("terms").is_some_and(FieldValue::is_checked)}
                       onchange={on_value.reform(|e: Event| {
                           let input: HtmlInputElement = e.target_unchecked_into();
                           ("terms", FieldValue::Checked(input.checked()))
                       })} />
                <label for="terms">{ "I agree to the terms and conditions *" }</label>
                <FieldError field_id="terms" view={errors.view("terms")} />
            </div>
            <SubmitButton label="Send Message" state={button_state} />
        </form>
    }
}

// ──────────────────────────────────────────────────────────────────────────────
// Newsletter

const SUBSCRIBE_LABEL: &str = "Subscribe";

#[function_component(NewsletterForm)]
fn newsletter_form(props: &SectionProps) -> Html {
    let email = use_state(String::new);
    let (button_state, start_busy) = use_busy_button(SUBMIT_BUSY_MS);

    let oninput = {
        let email = email.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            email.set(input.value());
        })
    };

    let onsubmit = {
        let email = email.clone();
        let notify = props.page.notify.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            start_busy.emit(());
            let mut notifier = QueuedNotifier::default();
            if submit_newsletter(&email, &mut notifier) {
                email.set(String::new());
            }
            notifier.flush(&notify);
        })
    };

    html! {
        <form id="newsletterForm" class="newsletter-form" novalidate={true} {onsubmit}>
            <input type="email" placeholder="Enter your email" value={(*email).clone()} {oninput} />
            <SubmitButton label={SUBSCRIBE_LABEL} state={button_state} />
        </form>
    }
}

// ──────────────────────────────────────────────────────────────────────────────
// Course catalog

#[function_component(CourseCatalog)]
fn course_catalog(props: &SectionProps) -> Html {
    let courses = use_memo((), |_| {
        read_courses_from_csv_string(include_str!("courses.csv")).unwrap_or_else(|e| {
            warn!("Course catalog unavailable: {}", e);
            Vec::new()
        })
    });
    let filter = use_state(CategoryFilter::default);

    let on_enroll = {
        let notify = props.page.notify.clone();
        Callback::from(move |title: String| {
            notify.emit((enrollment_message(&title), NotificationKind::Info));
        })
    };

    let filter_button = |value: &str, label: &str| {
        let target = CategoryFilter::from_data_category(value);
        let class = classes!("filter-btn", (*filter == target).then_some("active"));
        let onclick = {
            let filter = filter.clone();
            let target = target.clone();
            Callback::from(move |_: MouseEvent| filter.set(target.clone()))
        };
        html! {
            <button {class} data-category={value.to_string()} {onclick}>{ label.to_string() }</button>
        }
    };

    html! {
        <>
            <div class="course-filters">
                { filter_button("all", "All Courses") }
                { categories(&courses).into_iter().map(|c| filter_button(c, &capitalize(c))).collect::<Html>() }
            </div>
            <div class="courses-grid">
                { filter_courses(&courses, &filter).into_iter().map(|course| html! {
                    <CourseCard key={course.title.clone()} course={course.clone()} on_enroll={on_enroll.clone()} />
                }).collect::<Html>() }
            </div>
        </>
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

// ──────────────────────────────────────────────────────────────────────────────
// App

#[function_component(Main)]
fn main_component() -> Html {
    let store = use_memo((), |_| open_default_store());
    let store: Rc<dyn KeyValueStore> = (*store).clone();
    let theme = {
        let store = store.clone();
        use_state(move || ThemePreference::load(&*store))
    };
    let host = use_notification_host();

    // Reflect the theme on <body>
    use_effect_with(*theme, |theme| {
        let dark = theme.body_class().is_some();
        if let Err(e) = gloo_utils::body().class_list().toggle_with_force(DARK_MODE_CLASS, dark) {
            warn!("Could not apply theme: {:?}", e);
        }
    });

    let on_toggle_theme = {
        let theme = theme.clone();
        let store = store.clone();
        Callback::from(move |_: ()| {
            let next = theme.toggled();
            if let Err(e) = ThemePreference::save(&*store, next) {
                warn!("Could not save theme preference: {}", e);
            }
            theme.set(next);
        })
    };

    let page = PageContext {
        store,
        notify: host.notify.clone(),
    };

    html! {
        <>
            <Navbar />
            <header id="home" class="hero">
                <h1>{ "Learn skills that move your career forward" }</h1>
                <p>{ "Hands-on courses taught by working professionals." }</p>
            </header>
            <section id="stats" class="stats">
                <StatCounter value="10,000+" label="Students Enrolled" />
                <StatCounter value="50+" label="Expert Instructors" />
                <StatCounter value="120+" label="Courses" />
                <StatCounter value="95%" label="Completion Rate" />
            </section>
            <section id="courses" class="courses">
                <h2>{ "Our Courses" }</h2>
                <CourseCatalog page={page.clone()} />
            </section>
            <section class="gallery">
                <LazyImage src="images/campus.jpg" alt="Campus" />
                <LazyImage src="images/classroom.jpg" alt="Classroom" />
                <LazyImage src="images/graduation.jpg" alt="Graduation" />
            </section>
            <section id="contact" class="contact">
                <h2>{ "Get in Touch" }</h2>
                <ContactForm page={page.clone()} />
            </section>
            <footer class="footer">
                <h3>{ "Newsletter" }</h3>
                <NewsletterForm {page} />
            </footer>
            <Toast notification={host.current.clone()} on_close={host.dismiss.clone()} />
            <DarkModeToggle theme={*theme} on_toggle={on_toggle_theme} />
        </>
    }
}

#[function_component]
pub fn App() -> Html {
    html! { <Main /> }
}

/// Entry point: routes panics to the console and renders the App.
fn main() {
    console_error_panic_hook::set_once();
    info!("starting course site");
    yew::Renderer::<App>::new().render();
}
