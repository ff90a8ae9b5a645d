use crate::content::{
    ContactLink, Locale, LocaleText, Project, CONTACT_LINKS, GALLERY_CAPTION, PROJECTS, SITE_NAME,
};
use crate::motion::{CursorFollower, PointerPosition};
use crate::particles::ParticleField;
use crate::view_model::{
    compute_render_model, CursorEmphasis, CursorModel, OverlayModel, SessionAction, SessionState,
    ViewInputs,
};
use gloo::events::EventListener;
use gloo::render::{request_animation_frame, AnimationFrame};
use std::{cell::RefCell, rc::Rc};
use wasm_bindgen::JsCast;
use web_sys::{window, Event, KeyboardEvent, MouseEvent, Window};
use yew::prelude::*;

const FALLBACK_VIEWPORT_WIDTH: f64 = 1280.0;

impl Reducible for SessionState {
    type Action = SessionAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let next = self.apply(action);
        if next == *self {
            self
        } else {
            Rc::new(next)
        }
    }
}

fn viewport_width() -> f64 {
    window()
        .and_then(|w| w.inner_width().ok())
        .and_then(|value| value.as_f64())
        .unwrap_or(FALLBACK_VIEWPORT_WIDTH)
}

fn prefers_reduced_motion() -> bool {
    window()
        .and_then(|w| {
            w.match_media("(prefers-reduced-motion: reduce)")
                .ok()
                .flatten()
        })
        .map(|mq| mq.matches())
        .unwrap_or(false)
}

fn apply_locale(locale: Locale) {
    if let Some(document) = window().and_then(|w| w.document()) {
        if let Some(root) = document.document_element() {
            let _ = root.set_attribute("lang", locale.html_lang());
        }
    }
}

fn seeded_rng() -> fastrand::Rng {
    let seed = (js_sys::Math::random() * u64::MAX as f64) as u64;
    fastrand::Rng::with_seed(seed)
}

fn install_window_listeners(
    win: &Window,
    dispatcher: UseReducerDispatcher<SessionState>,
) -> Vec<EventListener> {
    let mut listeners = Vec::new();

    let on_move = dispatcher.clone();
    listeners.push(EventListener::new(win, "mousemove", move |event: &Event| {
        let Some(event) = event.dyn_ref::<MouseEvent>() else {
            return;
        };
        on_move.dispatch(SessionAction::PointerMoved {
            x: f64::from(event.client_x()),
            y: f64::from(event.client_y()),
        });
    }));

    let on_resize = dispatcher.clone();
    listeners.push(EventListener::new(win, "resize", move |_event: &Event| {
        on_resize.dispatch(SessionAction::Resized {
            width: viewport_width(),
        });
    }));

    listeners.push(EventListener::new(win, "keydown", move |event: &Event| {
        let Some(event) = event.dyn_ref::<KeyboardEvent>() else {
            return;
        };
        if event.key() == "Escape" {
            dispatcher.dispatch(SessionAction::Dismiss);
        }
    }));

    listeners
}

/// Window listeners live exactly as long as the component that installs them.
#[hook]
fn use_window_listeners(dispatcher: UseReducerDispatcher<SessionState>) {
    use_effect_with((), move |_| {
        let listeners = window()
            .map(|win| install_window_listeners(&win, dispatcher))
            .unwrap_or_default();
        move || drop(listeners)
    });
}

type FrameSlot = Rc<RefCell<Option<AnimationFrame>>>;

fn schedule_follow_frame(
    follower: Rc<RefCell<CursorFollower>>,
    frame: FrameSlot,
    rendered: UseStateHandle<PointerPosition>,
    last_timestamp: Option<f64>,
) {
    let slot = frame.clone();
    let handle = request_animation_frame(move |timestamp| {
        frame.borrow_mut().take();
        let dt_secs = last_timestamp
            .map(|previous| (timestamp - previous).max(0.0) / 1000.0)
            .unwrap_or(0.0);
        let moving = follower.borrow_mut().step(dt_secs);
        rendered.set(follower.borrow().position());

        if moving {
            schedule_follow_frame(follower, frame, rendered, Some(timestamp));
        }
    });
    *slot.borrow_mut() = Some(handle);
}

/// Springs the rendered cursor toward `target`, one step per animation frame.
#[hook]
fn use_cursor_follower(target: PointerPosition, reduced_motion: bool) -> PointerPosition {
    let follower = use_mut_ref(|| CursorFollower::new(target));
    let frame: FrameSlot = use_mut_ref(|| None);
    let rendered = use_state_eq(|| target);

    {
        let follower = follower.clone();
        let frame = frame.clone();
        let rendered = rendered.clone();
        use_effect_with((target, reduced_motion), move |(target, reduced_motion)| {
            follower.borrow_mut().set_target(*target);

            if *reduced_motion {
                frame.borrow_mut().take();
                follower.borrow_mut().snap();
                rendered.set(follower.borrow().position());
            } else if frame.borrow().is_none() {
                schedule_follow_frame(follower, frame, rendered, None);
            }
            || ()
        });
    }

    {
        let frame = frame.clone();
        use_effect_with((), move |_| {
            move || {
                frame.borrow_mut().take();
            }
        });
    }

    *rendered
}

#[function_component(FallingBlocksBackground)]
fn falling_blocks_background() -> Html {
    let field = use_state(|| ParticleField::generate(&mut seeded_rng()));

    html! {
        <div class="falling-blocks" aria-hidden="true">
            { for field.particles().iter().map(|particle| html! {
                <div class="falling-block" style={particle.style()} />
            }) }
        </div>
    }
}

#[derive(Properties, PartialEq)]
struct CursorDotProps {
    target: PointerPosition,
    emphasis: CursorEmphasis,
    reduced_motion: bool,
}

/// Owns the cursor spring so per-frame updates re-render only the dot.
#[function_component(CursorDot)]
fn cursor_dot(props: &CursorDotProps) -> Html {
    let position = use_cursor_follower(props.target, props.reduced_motion);
    let cursor = CursorModel::at(position, props.emphasis);

    html! {
        <div class="cursor-dot-anchor" style={cursor.style()} aria-hidden="true">
            <div class="cursor-dot" />
        </div>
    }
}

#[derive(Properties, PartialEq)]
struct HeroProps {
    text: &'static LocaleText,
}

#[function_component(Hero)]
fn hero(props: &HeroProps) -> Html {
    html! {
        <section class="section hero" aria-labelledby="hero-heading">
            <div class="hero-title">
                <h1 id="hero-heading">{"PORTFOLIO"}</h1>
            </div>
            <div class="hero-copy">
                <h2>{props.text.hero_title}</h2>
                <p>
                    { for props.text.hero_lines.iter().map(|line| html! {
                        <span class="hero-line">{*line}</span>
                    }) }
                </p>
            </div>
            <div class="scroll-hint" aria-hidden="true">{"↓"}</div>
        </section>
    }
}

#[derive(Properties, PartialEq)]
struct ProjectPanelProps {
    project: Project,
    on_select: Callback<u32>,
    on_hover: Callback<bool>,
}

#[function_component(ProjectPanel)]
fn project_panel(props: &ProjectPanelProps) -> Html {
    let project = props.project;

    let onclick = {
        let on_select = props.on_select.clone();
        Callback::from(move |_: MouseEvent| on_select.emit(project.id))
    };
    let onmouseenter = props.on_hover.reform(|_: MouseEvent| true);
    let onmouseleave = props.on_hover.reform(|_: MouseEvent| false);
    let accent = project.accent.css();

    html! {
        <article
            class="block-panel"
            style={format!("--panel-accent: {accent};")}
            onclick={onclick}
            onmouseenter={onmouseenter}
            onmouseleave={onmouseleave}
        >
            <div class="panel-head">
                <span class="panel-mark" aria-hidden="true">{"■"}</span>
                <span class="panel-index">{project.index_label()}</span>
            </div>
            <div class="panel-media">
                <img src={project.image} alt={project.title} loading="lazy" />
            </div>
            <div class="panel-copy">
                <h3>{project.title}</h3>
                <div class="panel-meta">
                    <span>{project.category}</span>
                    <span>{format!("— {}", project.year)}</span>
                </div>
            </div>
        </article>
    }
}

#[derive(Properties, PartialEq)]
struct GalleryProps {
    track_style: AttrValue,
    on_select: Callback<u32>,
    on_hover: Callback<bool>,
}

#[function_component(Gallery)]
fn gallery(props: &GalleryProps) -> Html {
    html! {
        <section class="gallery" aria-label="Selected works">
            <div class="gallery-caption">
                <span>{GALLERY_CAPTION}</span>
            </div>
            <div class="gallery-track" style={props.track_style.clone()}>
                { for PROJECTS.iter().map(|project| html! {
                    <ProjectPanel
                        key={project.id}
                        project={*project}
                        on_select={props.on_select.clone()}
                        on_hover={props.on_hover.clone()}
                    />
                }) }
            </div>
        </section>
    }
}

#[derive(Properties, PartialEq)]
struct FooterProps {
    text: &'static LocaleText,
    on_toggle_locale: Callback<MouseEvent>,
    on_hover: Callback<bool>,
}

fn contact_link(link: &ContactLink) -> Html {
    if link.new_tab {
        html! {
            <a class="contact-link" href={link.href} target="_blank" rel="noopener noreferrer">
                {link.label}
                <span class="sr-only">{" (opens in a new tab)"}</span>
            </a>
        }
    } else {
        html! { <a class="contact-link" href={link.href}>{link.label}</a> }
    }
}

#[function_component(Footer)]
fn footer(props: &FooterProps) -> Html {
    html! {
        <footer class="site-footer">
            <h2
                onmouseenter={props.on_hover.reform(|_: MouseEvent| true)}
                onmouseleave={props.on_hover.reform(|_: MouseEvent| false)}
            >
                {props.text.ready}
            </h2>
            <div class="footer-actions">
                { for CONTACT_LINKS.iter().map(contact_link) }
                <button class="locale-toggle" type="button" onclick={props.on_toggle_locale.clone()}>
                    {props.text.toggle_label}
                </button>
            </div>
        </footer>
    }
}

#[derive(Properties, PartialEq)]
struct ProjectOverlayProps {
    overlay: OverlayModel,
    on_close: Callback<()>,
    on_hover: Callback<bool>,
}

#[function_component(ProjectOverlay)]
fn project_overlay(props: &ProjectOverlayProps) -> Html {
    let overlay = &props.overlay;
    let onclick = props.on_close.reform(|_: MouseEvent| ());

    html! {
        <div class="project-overlay" role="dialog" aria-modal="true" aria-labelledby="overlay-title">
            <button
                class="overlay-close"
                type="button"
                aria-label="Close project"
                onclick={onclick}
                onmouseenter={props.on_hover.reform(|_: MouseEvent| true)}
                onmouseleave={props.on_hover.reform(|_: MouseEvent| false)}
            >
                <span aria-hidden="true">{"✕"}</span>
            </button>

            <div class="overlay-body">
                <span class="overlay-tag" style={format!("color: {};", overlay.accent.css())}>
                    {overlay.tag.clone()}
                </span>
                <h2 id="overlay-title">{overlay.title}</h2>

                <div class="block-panel overlay-card">
                    <div class="overlay-facts">
                        <div>
                            <h4>{"YEAR"}</h4>
                            <p>{overlay.year}</p>
                        </div>
                        <div>
                            <h4>{"TYPE"}</h4>
                            <p>{overlay.category}</p>
                        </div>
                    </div>

                    <div class="overlay-description">
                        <h4>{"DESCRIPTION"}</h4>
                        <p>
                            {"This is a placeholder description for "}
                            <b>{overlay.title}</b>
                            {"."}
                        </p>
                        <p>
                            {"Here you can add specific details about the project, the process, the tools used (Rhino, Rendering, etc.), and the outcome."}
                        </p>
                    </div>

                    <div class="overlay-gallery">
                        <p class="overlay-gallery-label">{"IMAGE GALLERY"}</p>
                        <div class="overlay-gallery-frame">
                            <img src={overlay.image} alt={overlay.title} />
                        </div>
                    </div>
                </div>
            </div>
        </div>
    }
}

#[function_component(App)]
fn app() -> Html {
    let session = use_reducer(|| SessionState::new(viewport_width()));
    let reduced_motion = use_state(prefers_reduced_motion);
    use_window_listeners(session.dispatcher());

    {
        let locale = session.locale;
        use_effect_with(locale, |locale| {
            apply_locale(*locale);
            || ()
        });
    }

    let model = compute_render_model(&ViewInputs::from_session(&session));
    let track_style = AttrValue::from(model.gallery_style());
    let dispatcher = session.dispatcher();

    let on_select = {
        let dispatcher = dispatcher.clone();
        Callback::from(move |id: u32| dispatcher.dispatch(SessionAction::SelectProject(id)))
    };

    let on_close = {
        let dispatcher = dispatcher.clone();
        Callback::from(move |_: ()| dispatcher.dispatch(SessionAction::Dismiss))
    };

    let on_hover = {
        let dispatcher = dispatcher.clone();
        Callback::from(move |hovering: bool| dispatcher.dispatch(SessionAction::Hover(hovering)))
    };

    let on_toggle_locale =
        Callback::from(move |_: MouseEvent| dispatcher.dispatch(SessionAction::ToggleLocale));

    html! {
        <div class="page-shell">
            <FallingBlocksBackground />
            <CursorDot
                target={session.pointer.position()}
                emphasis={model.cursor_emphasis}
                reduced_motion={*reduced_motion}
            />

            <header class="site-header">
                <div
                    onmouseenter={on_hover.reform(|_: MouseEvent| true)}
                    onmouseleave={on_hover.reform(|_: MouseEvent| false)}
                >
                    <span class="site-name">{SITE_NAME}</span>
                </div>
                <div class="site-menu">{"MENU"}</div>
            </header>

            <main>
                <Hero text={model.text} />
                <Gallery
                    track_style={track_style}
                    on_select={on_select}
                    on_hover={on_hover.clone()}
                />
            </main>

            <Footer text={model.text} on_toggle_locale={on_toggle_locale} on_hover={on_hover.clone()} />

            if let Some(overlay) = model.overlay {
                <ProjectOverlay overlay={overlay} on_close={on_close} on_hover={on_hover} />
            }
        </div>
    }
}

pub fn run() {
    let root = window()
        .and_then(|w| w.document())
        .and_then(|d| d.get_element_by_id("app"));

    match root {
        Some(root) => yew::Renderer::<App>::with_root(root).render(),
        None => yew::Renderer::<App>::new().render(),
    };
}
