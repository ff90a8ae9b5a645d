use crate::content::{find_project, AccentColor, Locale, LocaleText, Project, PROJECTS};
use crate::motion::{PointerPosition, PointerTracker, GALLERY_SLIDE};

const CURSOR_EMPHASIS_SCALE: f64 = 3.0;
const CURSOR_EMPHASIS_ROTATE_DEG: f64 = 45.0;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Selection {
    #[default]
    Closed,
    Open(Project),
}

impl Selection {
    /// Opening over an open overlay replaces the shown project. `None` is a no-op.
    pub fn open(self, project: Option<&Project>) -> Self {
        match project {
            Some(project) => Self::Open(*project),
            None => self,
        }
    }

    pub fn close(self) -> Self {
        Self::Closed
    }

    pub fn project(&self) -> Option<&Project> {
        match self {
            Self::Closed => None,
            Self::Open(project) => Some(project),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SessionAction {
    PointerMoved { x: f64, y: f64 },
    Resized { width: f64 },
    SelectProject(u32),
    Dismiss,
    ToggleLocale,
    Hover(bool),
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SessionState {
    pub pointer: PointerTracker,
    pub viewport_width: f64,
    pub selection: Selection,
    pub locale: Locale,
    pub hovering: bool,
}

impl SessionState {
    pub fn new(viewport_width: f64) -> Self {
        Self {
            pointer: PointerTracker::default(),
            viewport_width: sanitize_width(viewport_width, 0.0),
            selection: Selection::Closed,
            locale: Locale::default(),
            hovering: false,
        }
    }

    pub fn apply(&self, action: SessionAction) -> Self {
        self.apply_with_catalog(action, &PROJECTS)
    }

    pub fn apply_with_catalog(&self, action: SessionAction, catalog: &[Project]) -> Self {
        let mut next = *self;
        match action {
            SessionAction::PointerMoved { x, y } => {
                next.pointer.record(x, y);
            }
            SessionAction::Resized { width } => {
                next.viewport_width = sanitize_width(width, self.viewport_width);
            }
            SessionAction::SelectProject(id) => {
                next.selection = self.selection.open(find_project(catalog, id));
            }
            SessionAction::Dismiss => {
                // The close button unmounts under the pointer without a mouseleave.
                if self.selection.project().is_some() {
                    next.hovering = false;
                }
                next.selection = self.selection.close();
            }
            SessionAction::ToggleLocale => {
                next.locale = self.locale.toggled();
            }
            SessionAction::Hover(hovering) => {
                next.hovering = hovering;
            }
        }
        next
    }
}

fn sanitize_width(width: f64, fallback: f64) -> f64 {
    if width.is_finite() && width >= 0.0 {
        width
    } else {
        fallback
    }
}

pub struct ViewInputs<'a> {
    pub pointer: PointerPosition,
    pub viewport_width: f64,
    pub selection: &'a Selection,
    pub locale: Locale,
    pub hovering: bool,
}

impl<'a> ViewInputs<'a> {
    pub fn from_session(session: &'a SessionState) -> Self {
        Self {
            pointer: session.pointer.position(),
            viewport_width: session.viewport_width,
            selection: &session.selection,
            locale: session.locale,
            hovering: session.hovering,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CursorEmphasis {
    pub scale: f64,
    pub rotate_deg: f64,
}

impl CursorEmphasis {
    pub const REST: Self = Self {
        scale: 1.0,
        rotate_deg: 0.0,
    };
    pub const HOVER: Self = Self {
        scale: CURSOR_EMPHASIS_SCALE,
        rotate_deg: CURSOR_EMPHASIS_ROTATE_DEG,
    };
}

/// Where the trailing cursor is drawn this frame and how it is emphasised.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CursorModel {
    pub x: f64,
    pub y: f64,
    pub scale: f64,
    pub rotate_deg: f64,
}

impl CursorModel {
    pub fn at(position: PointerPosition, emphasis: CursorEmphasis) -> Self {
        Self {
            x: position.x,
            y: position.y,
            scale: emphasis.scale,
            rotate_deg: emphasis.rotate_deg,
        }
    }

    pub fn style(&self) -> String {
        format!(
            "--cursor-x: {:.2}px; --cursor-y: {:.2}px; --cursor-scale: {}; --cursor-rotate: {}deg;",
            self.x, self.y, self.scale, self.rotate_deg
        )
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct OverlayModel {
    pub tag: String,
    pub title: &'static str,
    pub year: &'static str,
    pub category: &'static str,
    pub accent: AccentColor,
    pub image: &'static str,
}

impl OverlayModel {
    fn for_project(project: &Project) -> Self {
        Self {
            tag: format!("PROJECT {}", project.index_label()),
            title: project.title,
            year: project.year,
            category: project.category,
            accent: project.accent,
            image: project.image,
        }
    }
}

pub struct RenderModel {
    pub cursor_emphasis: CursorEmphasis,
    pub gallery_offset_percent: f64,
    pub overlay: Option<OverlayModel>,
    pub text: &'static LocaleText,
    pub html_lang: &'static str,
}

impl RenderModel {
    pub fn gallery_style(&self) -> String {
        format!("transform: translateX({:.3}%);", self.gallery_offset_percent)
    }
}

pub fn compute_render_model(inputs: &ViewInputs<'_>) -> RenderModel {
    let cursor_emphasis = if inputs.hovering {
        CursorEmphasis::HOVER
    } else {
        CursorEmphasis::REST
    };

    RenderModel {
        cursor_emphasis,
        gallery_offset_percent: GALLERY_SLIDE
            .offset_for_pointer(inputs.pointer.x, inputs.viewport_width),
        overlay: inputs.selection.project().map(OverlayModel::for_project),
        text: inputs.locale.text(),
        html_lang: inputs.locale.html_lang(),
    }
}
