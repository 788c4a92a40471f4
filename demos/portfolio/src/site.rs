//! Portfolio starmap: planets are content sections, flown to by ship.
//!
//! Two rooms of planets. Landing on one opens its content panel (rendered by
//! the page) or moves to the other room.

use orbit_engine::*;
use serde::Deserialize;

use crate::names::{make_planet_name, NAMES};

// ── Content panels opened on the page ───────────────────────────────

pub const PANEL_ABOUT: u32 = 1;
pub const PANEL_PROJECTS: u32 = 2;
pub const PANEL_SKILLS: u32 = 3;
pub const PANEL_CONTACT: u32 = 4;
pub const PANEL_CASE_A: u32 = 5;
pub const PANEL_CASE_B: u32 = 6;

// ── Skills planet ────────────────────────────────────────────────────

const SKILLS_LABEL: &str = "My Skills";
const SKILLS_SIZE_DEFAULT: f32 = 54.0;
const SKILLS_SIZE_MIN: f32 = 36.0;
const SKILLS_SIZE_MAX: f32 = 80.0;
const SKILLS_BELT: BeltSpec = BeltSpec { count: 130, inner: 1.6, outer: 2.15, tilt: -0.28 };

/// Planet image files whose names differ from their texture key.
const FILE_OVERRIDES: [(&str, &str); 12] = [
    ("abysium", "Abyssium"),
    ("abyssium", "Abyssium"),
    ("cindrix", "Cindrix"),
    ("thal3", "Thal3"),
    ("orionisix", "Orionis-IX"),
    ("volara", "Volara"),
    ("nyxus", "Nyxus"),
    ("aurelia", "Aurelia"),
    ("kairon", "Kairon"),
    ("xerith", "Xerith"),
    ("vespera", "Vespera"),
    ("solyn", "Solyn"),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaletteKind {
    Amber,
    Aqua,
    Coral,
    Mint,
    Violet,
}

impl PaletteKind {
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "amber" => Some(PaletteKind::Amber),
            "aqua" => Some(PaletteKind::Aqua),
            "coral" => Some(PaletteKind::Coral),
            "mint" => Some(PaletteKind::Mint),
            "violet" => Some(PaletteKind::Violet),
            _ => None,
        }
    }

    pub fn palette(self) -> Palette {
        let (id, base, shade, highlight, glow, ring) = match self {
            PaletteKind::Amber => (0, 0xffd84a, 0xf4b800, 0xfff8c9, 0xffe05e, None),
            PaletteKind::Aqua => (1, 0x78d7ff, 0x3682ff, 0xeaffff, 0x9edbff, Some((160, 210, 255, 0.6))),
            PaletteKind::Coral => (2, 0xff9aa2, 0xff4f6d, 0xffe9ec, 0xffc3ca, None),
            PaletteKind::Mint => (3, 0x9df6c7, 0x2ce6a1, 0xeafff6, 0xaefbd7, None),
            PaletteKind::Violet => (4, 0xb99cff, 0x6e52ff, 0xefeaff, 0xc9b3ff, Some((185, 156, 255, 0.55))),
        };
        Palette {
            id,
            base: hex(base),
            shade: hex(shade),
            highlight: hex(highlight),
            glow: hex(glow),
            ring: ring.map(|(r, g, b, a)| Color::rgb8(r, g, b).with_alpha(a)),
        }
    }

    /// Warp tint for flights to planets of this palette.
    pub fn warp(self) -> WarpTheme {
        match self {
            PaletteKind::Amber | PaletteKind::Coral => WarpTheme::Magma,
            PaletteKind::Aqua => WarpTheme::Cyan,
            PaletteKind::Mint => WarpTheme::Emerald,
            PaletteKind::Violet => WarpTheme::Violet,
        }
    }
}

fn hex(rgb: u32) -> Color {
    Color::rgb8((rgb >> 16) as u8, (rgb >> 8) as u8, rgb as u8)
}

// ── Page-supplied site data ──────────────────────────────────────────

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SkillsPlanetData {
    pub name: Option<String>,
    pub label: Option<String>,
    pub size: Option<f32>,
    pub palette: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SiteData {
    pub skills_planet: SkillsPlanetData,
    pub auto_start_intro_ms: Option<f64>,
    /// Seed for generated planet names.
    pub seed: Option<u64>,
}

pub struct Portfolio {
    site: SiteData,
    rng: Rng,
}

impl Portfolio {
    pub fn new() -> Self {
        Self {
            site: SiteData::default(),
            rng: Rng::new(SceneConfig::default().seed),
        }
    }

    fn planet(name: &str, x: f32, y: f32, radius: f32, kind: PaletteKind, label: &str) -> Target {
        Target::new(name, Percent::new(x, y), radius, kind.palette())
            .with_label(label)
            .with_warp(kind.warp())
    }

    fn skills_planet(&mut self) -> Target {
        let cfg = &self.site.skills_planet;
        let kind = cfg
            .palette
            .as_deref()
            .and_then(PaletteKind::from_name)
            .unwrap_or(PaletteKind::Violet);
        let radius = cfg
            .size
            .unwrap_or(SKILLS_SIZE_DEFAULT)
            .clamp(SKILLS_SIZE_MIN, SKILLS_SIZE_MAX);
        let label = cfg.label.clone().unwrap_or_else(|| SKILLS_LABEL.to_string());
        let name = match cfg.name.clone() {
            Some(name) => name,
            None => make_planet_name(&mut self.rng),
        };

        Self::planet(&name, 75.0, 68.0, radius, kind, &label)
            .with_belt(SKILLS_BELT)
            .with_action(|ctx| ctx.open_panel(PANEL_SKILLS))
    }
}

impl Default for Portfolio {
    fn default() -> Self {
        Self::new()
    }
}

impl Setup for Portfolio {
    fn config(&self) -> SceneConfig {
        let mut config = SceneConfig::default();
        config.intro.auto_start_ms = self.site.auto_start_intro_ms;
        config
    }

    fn load(&mut self, site_json: &str) -> Result<(), serde_json::Error> {
        self.site = serde_json::from_str(site_json)?;
        if let Some(seed) = self.site.seed {
            self.rng = Rng::new(seed);
        }
        log::info!("portfolio: site data loaded");
        Ok(())
    }

    fn rooms(&mut self) -> Vec<Room> {
        use PaletteKind::*;

        let hub = Room::new(vec![
            Self::planet(NAMES[0], 18.0, 26.0, 46.0, Amber, "About Me")
                .with_action(|ctx| ctx.open_panel(PANEL_ABOUT)),
            Self::planet(NAMES[7], 47.0, 42.0, 36.0, Aqua, "Projects")
                .with_action(|ctx| ctx.open_panel(PANEL_PROJECTS)),
            self.skills_planet(),
            Self::planet(NAMES[6], 78.0, 22.0, 40.0, Coral, "Contact")
                .with_action(|ctx| ctx.open_panel(PANEL_CONTACT)),
            Self::planet(NAMES[3], 42.0, 74.0, 40.0, Mint, "Next Room →")
                .with_action(|ctx| ctx.switch_room(1)),
        ]);

        let cases = Room::new(vec![
            Self::planet(NAMES[1], 30.0, 30.0, 42.0, Aqua, "Case Study A")
                .with_action(|ctx| ctx.open_panel(PANEL_CASE_A)),
            Self::planet(NAMES[4], 70.0, 30.0, 48.0, Coral, "Case Study B")
                .with_action(|ctx| ctx.open_panel(PANEL_CASE_B)),
            Self::planet(NAMES[2], 50.0, 80.0, 40.0, Amber, "← Back")
                .with_action(|ctx| ctx.switch_room(0)),
        ]);

        vec![hub, cases]
    }

    fn manifest(&self) -> PlanetManifest {
        FILE_OVERRIDES
            .iter()
            .fold(PlanetManifest::default(), |m, (key, file)| m.with_override(*key, *file))
    }
}
