pub const SITE_NAME: &str = "Jieyon Hong Portfolio";
pub const GALLERY_CAPTION: &str = "SELECTED_WORKS [HOVER TO NAVIGATE]";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AccentColor {
    Theme(u8),
    Literal(&'static str),
}

impl AccentColor {
    pub fn css(self) -> String {
        match self {
            Self::Theme(slot) => format!("var(--color-accent-{slot})"),
            Self::Literal(value) => value.to_string(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Project {
    pub id: u32,
    pub title: &'static str,
    pub category: &'static str,
    pub year: &'static str,
    pub accent: AccentColor,
    pub image: &'static str,
}

impl Project {
    pub fn index_label(&self) -> String {
        format!("{:02}", self.id)
    }
}

pub const PROJECTS: [Project; 4] = [
    Project {
        id: 1,
        title: "Rhino_Rotry Tool",
        category: "3D MODELING",
        year: "2025",
        accent: AccentColor::Theme(1),
        image: "/assets/rotary.png",
    },
    Project {
        id: 2,
        title: "Character Rendering",
        category: "RENDERING",
        year: "2025",
        accent: AccentColor::Theme(2),
        image: "/assets/character.png",
    },
    Project {
        id: 3,
        title: "Air Conditioner Design",
        category: "PRODUCT DESIGN",
        year: "2025",
        accent: AccentColor::Theme(3),
        image: "/assets/aircon.png",
    },
    Project {
        id: 4,
        title: "Rhino_Game Pad",
        category: "3D MODELING",
        year: "2025",
        accent: AccentColor::Literal("#000000"),
        image: "/assets/gamepad.png",
    },
];

pub fn find_project(catalog: &[Project], id: u32) -> Option<&Project> {
    catalog.iter().find(|project| project.id == id)
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Locale {
    #[default]
    Korean,
    English,
}

#[derive(Debug, PartialEq, Eq)]
pub struct LocaleText {
    pub hero_title: &'static str,
    pub hero_lines: [&'static str; 4],
    pub ready: &'static str,
    /// Labelled with the language the button switches *to*.
    pub toggle_label: &'static str,
}

static KOREAN_TEXT: LocaleText = LocaleText {
    hero_title: "안녕하세요.",
    hero_lines: [
        "디자인공학을 전공하며",
        "구조와 인터랙션의 관계를 탐구하는 홍지연입니다.",
        "AI를 사고 도구로 활용하여",
        "안정적인 시스템 안에서 실험적인 디자인을 설계합니다.",
    ],
    ready: "READY?",
    toggle_label: "ENG",
};

static ENGLISH_TEXT: LocaleText = LocaleText {
    hero_title: "HELLO.",
    hero_lines: [
        "Majoring in Design Engineering,",
        "I explore the relationship between structure and interaction.",
        "Using AI as a thinking tool,",
        "I design experimental works within stable systems.",
    ],
    ready: "GET IN TOUCH",
    toggle_label: "KOR",
};

impl Locale {
    pub fn toggled(self) -> Self {
        match self {
            Self::Korean => Self::English,
            Self::English => Self::Korean,
        }
    }

    pub fn html_lang(self) -> &'static str {
        match self {
            Self::Korean => "ko",
            Self::English => "en",
        }
    }

    pub fn text(self) -> &'static LocaleText {
        match self {
            Self::Korean => &KOREAN_TEXT,
            Self::English => &ENGLISH_TEXT,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ContactLink {
    pub label: &'static str,
    pub href: &'static str,
    pub new_tab: bool,
}

pub const CONTACT_LINKS: [ContactLink; 2] = [
    ContactLink {
        label: "MAIL",
        href: "mailto:hoiizyeon@gmail.com",
        new_tab: false,
    },
    ContactLink {
        label: "YOUTUBE",
        href: "https://www.youtube.com/@hoii_z",
        new_tab: true,
    },
];
