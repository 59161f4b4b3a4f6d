//! Generation of UI themes from seed colors.
//!
//! A [`Theme`] maps every seed color to a set of roles, every role to a set
//! of interaction states, and every state to a [`TargetSet`] with the colors
//! for background, foreground, border, and muted content. All colors derive
//! from the seed colors through [`Derivation`] functions, which also receive
//! whether the theme is dark.
//!
//! The default roles are `surface`, `default`, `emphasis`, and `interactive`.
//! They fix CIELCh lightness and chroma while keeping the seed's hue. The
//! default states are `default`, `hover`, `focus`, `active`, and `disabled`.
//! They shift lightness and scale chroma of the role color. The foreground is
//! the role and state color's [`Color::contrast`] with
//! [`ContrastOptions::THEME`].
//!
//!
//! # Example
//!
//! ```
//! # use chromakit::Color;
//! # use chromakit::error::ParseError;
//! # use chromakit::theme::{Theme, ThemeOptions};
//! let options = ThemeOptions::builder()
//!     .seed("brand", Color::from_hex("#6c50ff")?)
//!     .dark(true)
//!     .build();
//! let theme = Theme::new(&options);
//!
//! let button = theme.get("brand", "interactive", "hover").unwrap();
//! assert_eq!(button.background.lch().l, 58.0);
//! assert!(button.foreground.contrast_ratio_apca(&button.background).abs() > 0.0);
//! assert!(theme.get("brand", "interactive", "pressed").is_none());
//! # Ok::<(), ParseError>(())
//! ```

use std::collections::BTreeMap;
use std::sync::Arc;

use tracing::debug;

use crate::channels::Lch;
use crate::opt::ContrastOptions;
use crate::{Color, Float};

/// A function deriving one color from another. The flag is `true` for dark
/// themes.
pub type Derivation = Arc<dyn Fn(&Color, bool) -> Color + Send + Sync>;

/// Create a color with the base color's hue and alpha but the given CIELCh
/// lightness and chroma.
fn with_lightness_chroma(base: &Color, lightness: Float, chroma: Float) -> Color {
    let Lch { h, alpha, .. } = *base.lch();
    Color::from_lch(&Lch::new(lightness, chroma, h, alpha))
}

fn role(dark: (Float, Float), light: (Float, Float)) -> Derivation {
    Arc::new(move |base, is_dark| {
        let (lightness, chroma) = if is_dark { dark } else { light };
        with_lightness_chroma(base, lightness, chroma)
    })
}

fn state(delta: Float, factor: Float) -> Derivation {
    Arc::new(move |base, is_dark| {
        let Lch { l, c, .. } = *base.lch();
        let delta = if is_dark { delta } else { -delta };
        with_lightness_chroma(
            base,
            (l + delta).clamp(0.0, 100.0),
            (c * factor).clamp(0.0, 100.0),
        )
    })
}

/// Get the default roles `surface`, `default`, `emphasis`, and
/// `interactive`.
pub fn default_roles() -> Vec<(String, Derivation)> {
    vec![
        ("surface".to_owned(), role((10.0, 8.0), (98.0, 5.0))),
        ("default".to_owned(), role((18.0, 15.0), (92.0, 12.0))),
        ("emphasis".to_owned(), role((30.0, 30.0), (80.0, 25.0))),
        ("interactive".to_owned(), role((50.0, 60.0), (60.0, 55.0))),
    ]
}

/// Get the default states `default`, `hover`, `focus`, `active`, and
/// `disabled`.
///
/// Hover, focus, and active raise lightness in dark themes and lower it in
/// light themes, while boosting chroma. Disabled dims and desaturates.
pub fn default_states() -> Vec<(String, Derivation)> {
    let identity: Derivation = Arc::new(|base, _| base.clone());
    let disabled: Derivation = Arc::new(|base, is_dark| {
        let Lch { l, c, .. } = *base.lch();
        let factor = if is_dark { 0.5 } else { 0.95 };
        with_lightness_chroma(base, (l * factor).clamp(10.0, 95.0), (c * 0.3).clamp(0.0, 15.0))
    });

    vec![
        ("default".to_owned(), identity),
        ("hover".to_owned(), state(8.0, 1.15)),
        ("focus".to_owned(), state(12.0, 1.25)),
        ("active".to_owned(), state(18.0, 1.35)),
        ("disabled".to_owned(), disabled),
    ]
}

/// Get the default border derivation, which moves lightness 15 away from
/// the background and scales chroma by 0.8.
pub fn default_border() -> Derivation {
    Arc::new(|base, is_dark| {
        let Lch { l, c, .. } = *base.lch();
        let delta = if is_dark { 15.0 } else { -15.0 };
        with_lightness_chroma(base, (l + delta).clamp(0.0, 100.0), c * 0.8)
    })
}

/// Get the default muted derivation, which moves lightness 35 away from the
/// background and scales chroma by 0.25.
pub fn default_muted() -> Derivation {
    Arc::new(|base, is_dark| {
        let Lch { l, c, .. } = *base.lch();
        let delta = if is_dark { 35.0 } else { -35.0 };
        with_lightness_chroma(base, (l + delta).clamp(15.0, 90.0), c * 0.25)
    })
}

/// Insert or replace a named derivation, preserving order.
fn upsert(entries: &mut Vec<(String, Derivation)>, name: &str, derivation: Derivation) {
    if let Some(entry) = entries.iter_mut().find(|(n, _)| n.as_str() == name) {
        entry.1 = derivation;
    } else {
        entries.push((name.to_owned(), derivation));
    }
}

// --------------------------------------------------------------------------------------------------------------------

/// A builder of theme options.
pub struct ThemeOptionBuilder(ThemeOptions);

impl ThemeOptionBuilder {
    /// Add a seed color with the given name, replacing any seed of the same
    /// name.
    pub fn seed(&mut self, name: impl Into<String>, color: Color) -> &mut Self {
        self.0.seeds.insert(name.into(), color);
        self
    }

    /// Set whether the theme is dark.
    pub fn dark(&mut self, dark: bool) -> &mut Self {
        self.0.dark = dark;
        self
    }

    /// Add or replace a role.
    pub fn role(
        &mut self,
        name: &str,
        derivation: impl Fn(&Color, bool) -> Color + Send + Sync + 'static,
    ) -> &mut Self {
        upsert(&mut self.0.roles, name, Arc::new(derivation));
        self
    }

    /// Replace all roles.
    pub fn roles(&mut self, roles: impl IntoIterator<Item = (String, Derivation)>) -> &mut Self {
        self.0.roles = roles.into_iter().collect();
        self
    }

    /// Add or replace a state.
    pub fn state(
        &mut self,
        name: &str,
        derivation: impl Fn(&Color, bool) -> Color + Send + Sync + 'static,
    ) -> &mut Self {
        upsert(&mut self.0.states, name, Arc::new(derivation));
        self
    }

    /// Replace all states.
    pub fn states(&mut self, states: impl IntoIterator<Item = (String, Derivation)>) -> &mut Self {
        self.0.states = states.into_iter().collect();
        self
    }

    /// Set the border derivation.
    pub fn border(
        &mut self,
        derivation: impl Fn(&Color, bool) -> Color + Send + Sync + 'static,
    ) -> &mut Self {
        self.0.border = Arc::new(derivation);
        self
    }

    /// Set the muted derivation.
    pub fn muted(
        &mut self,
        derivation: impl Fn(&Color, bool) -> Color + Send + Sync + 'static,
    ) -> &mut Self {
        self.0.muted = Arc::new(derivation);
        self
    }

    /// Set the options for deriving the foreground.
    pub fn contrast(&mut self, options: ContrastOptions) -> &mut Self {
        self.0.contrast = options;
        self
    }

    /// Instantiate the options.
    pub fn build(&self) -> ThemeOptions {
        self.0.clone()
    }
}

/// The options for generating a theme.
///
/// By default, there are no seed colors, the theme is light, the roles,
/// states, border, and muted derivations are the defaults of this module,
/// and the foreground uses [`ContrastOptions::THEME`].
#[derive(Clone)]
pub struct ThemeOptions {
    seeds: BTreeMap<String, Color>,
    dark: bool,
    roles: Vec<(String, Derivation)>,
    states: Vec<(String, Derivation)>,
    border: Derivation,
    muted: Derivation,
    contrast: ContrastOptions,
}

impl Default for ThemeOptions {
    fn default() -> Self {
        Self {
            seeds: BTreeMap::new(),
            dark: false,
            roles: default_roles(),
            states: default_states(),
            border: default_border(),
            muted: default_muted(),
            contrast: ContrastOptions::THEME,
        }
    }
}

impl ThemeOptions {
    /// Create a new builder with the default option values.
    pub fn builder() -> ThemeOptionBuilder {
        ThemeOptionBuilder(Self::default())
    }

    /// Create a new builder starting from these options.
    pub fn to_builder(&self) -> ThemeOptionBuilder {
        ThemeOptionBuilder(self.clone())
    }

    /// Get the seed colors.
    pub fn seeds(&self) -> impl Iterator<Item = (&str, &Color)> {
        self.seeds.iter().map(|(name, color)| (name.as_str(), color))
    }

    /// Determine whether the theme is dark.
    pub fn dark(&self) -> bool {
        self.dark
    }

    /// Get the role names in order.
    pub fn role_names(&self) -> impl Iterator<Item = &str> {
        self.roles.iter().map(|(name, _)| name.as_str())
    }

    /// Get the state names in order.
    pub fn state_names(&self) -> impl Iterator<Item = &str> {
        self.states.iter().map(|(name, _)| name.as_str())
    }

    /// Get the contrast options.
    pub fn contrast(&self) -> &ContrastOptions {
        &self.contrast
    }
}

impl std::fmt::Debug for ThemeOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ThemeOptions")
            .field("seeds", &self.seeds)
            .field("dark", &self.dark)
            .field("roles", &self.role_names().collect::<Vec<_>>())
            .field("states", &self.state_names().collect::<Vec<_>>())
            .field("contrast", &self.contrast)
            .finish_non_exhaustive()
    }
}

// --------------------------------------------------------------------------------------------------------------------

/// The colors for one role in one state.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, PartialEq)]
pub struct TargetSet {
    pub background: Color,
    pub foreground: Color,
    pub border: Color,
    pub muted: Color,
}

impl TargetSet {
    fn new(background: Color, options: &ThemeOptions) -> Self {
        let dark = options.dark;
        Self {
            foreground: background.contrast(&options.contrast),
            border: (options.border)(&background, dark),
            muted: (options.muted)(&background, dark),
            background,
        }
    }
}

/// The target sets of one role, keyed by state.
pub type StateSet = BTreeMap<String, TargetSet>;

/// The state sets of one seed color, keyed by role.
pub type RoleSet = BTreeMap<String, StateSet>;

/// A generated theme.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, PartialEq)]
pub struct Theme {
    dark: bool,
    colors: BTreeMap<String, RoleSet>,
}

impl Theme {
    /// Generate the theme for the given options.
    ///
    /// For every seed color, role, and state, this method applies the role
    /// derivation to the seed, then the state derivation to the role color,
    /// and finally fills in the target set for the resulting background.
    pub fn new(options: &ThemeOptions) -> Self {
        let dark = options.dark;
        let colors: BTreeMap<_, _> = options
            .seeds
            .iter()
            .map(|(name, seed)| {
                let roles = options
                    .roles
                    .iter()
                    .map(|(role, derive_role)| {
                        let base = derive_role(seed, dark);
                        let states = options
                            .states
                            .iter()
                            .map(|(state, derive_state)| {
                                let background = derive_state(&base, dark);
                                (state.clone(), TargetSet::new(background, options))
                            })
                            .collect();
                        (role.clone(), states)
                    })
                    .collect();
                (name.clone(), roles)
            })
            .collect();

        debug!(
            colors = colors.len(),
            roles = options.roles.len(),
            states = options.states.len(),
            dark,
            "built theme"
        );
        Self { dark, colors }
    }

    /// Determine whether this theme is dark.
    pub fn is_dark(&self) -> bool {
        self.dark
    }

    /// Look up the target set for the given seed color, role, and state.
    pub fn get(&self, color: &str, role: &str, state: &str) -> Option<&TargetSet> {
        self.colors.get(color)?.get(role)?.get(state)
    }

    /// Look up the role set for the given seed color.
    pub fn roles(&self, color: &str) -> Option<&RoleSet> {
        self.colors.get(color)
    }

    /// Iterate over the seed color names and their role sets.
    pub fn colors(&self) -> impl Iterator<Item = (&str, &RoleSet)> {
        self.colors.iter().map(|(name, roles)| (name.as_str(), roles))
    }
}

// ====================================================================================================================

#[cfg(test)]
mod test {
    use super::{Theme, ThemeOptions};
    use crate::core::assert_within;
    use crate::error::ParseError;
    use crate::opt::ContrastOptions;
    use crate::Color;

    fn theme(dark: bool) -> Result<Theme, ParseError> {
        let options = ThemeOptions::builder()
            .seed("brand", Color::from_hex("#6c50ff")?)
            .seed("neutral", Color::from_hex("#64748b")?)
            .dark(dark)
            .build();
        Ok(Theme::new(&options))
    }

    #[test]
    fn test_structure() -> Result<(), ParseError> {
        let theme = theme(false)?;
        assert!(!theme.is_dark());
        assert_eq!(
            theme.colors().map(|(name, _)| name).collect::<Vec<_>>(),
            vec!["brand", "neutral"]
        );

        let roles = theme.roles("brand").unwrap();
        assert_eq!(
            roles.keys().map(String::as_str).collect::<Vec<_>>(),
            vec!["default", "emphasis", "interactive", "surface"]
        );
        for states in roles.values() {
            assert_eq!(
                states.keys().map(String::as_str).collect::<Vec<_>>(),
                vec!["active", "default", "disabled", "focus", "hover"]
            );
        }

        assert!(theme.get("accent", "surface", "default").is_none());
        assert!(theme.get("brand", "toolbar", "default").is_none());
        Ok(())
    }

    #[test]
    fn test_roles_and_states() -> Result<(), ParseError> {
        let light = theme(false)?;
        let hue = Color::from_hex("#6c50ff")?.lch().h;

        let surface = &light.get("brand", "surface", "default").unwrap().background;
        assert_eq!(surface.lch().l, 98.0);
        assert_eq!(surface.lch().c, 5.0);
        assert_within!(surface.lch().h, hue, 1e-9);

        let hover = &light.get("brand", "default", "hover").unwrap().background;
        assert_within!(hover.lch().l, 84.0, 1e-9);
        assert_within!(hover.lch().c, 13.8, 1e-9);

        let dark = theme(true)?;
        let active = &dark.get("brand", "emphasis", "active").unwrap().background;
        assert_within!(active.lch().l, 48.0, 1e-9);
        assert_within!(active.lch().c, 40.5, 1e-9);

        let disabled = &dark.get("brand", "interactive", "disabled").unwrap().background;
        assert_within!(disabled.lch().l, 25.0, 1e-9);
        assert_within!(disabled.lch().c, 15.0, 1e-9);

        let disabled = &dark.get("brand", "surface", "disabled").unwrap().background;
        assert_within!(disabled.lch().l, 10.0, 1e-9);
        assert_within!(disabled.lch().c, 2.4, 1e-9);
        Ok(())
    }

    #[test]
    fn test_targets() -> Result<(), ParseError> {
        let dark = theme(true)?;
        let surface = dark.get("neutral", "surface", "default").unwrap();
        assert_within!(surface.border.lch().l, 25.0, 1e-9);
        assert_within!(surface.border.lch().c, 6.4, 1e-9);
        assert_within!(surface.muted.lch().l, 45.0, 1e-9);
        assert_within!(surface.muted.lch().c, 2.0, 1e-9);
        assert!(85.0 < surface.foreground.lch().l);
        assert_eq!(surface.foreground.alpha(), None);

        let active = dark.get("neutral", "interactive", "active").unwrap();
        assert_within!(active.muted.lch().l, 90.0, 1e-9);

        let light = theme(false)?;
        let surface = light.get("neutral", "surface", "default").unwrap();
        assert_within!(surface.border.lch().l, 83.0, 1e-9);
        assert_within!(surface.muted.lch().l, 63.0, 1e-9);
        assert!(surface.foreground.lch().l < 25.0);
        Ok(())
    }

    #[test]
    fn test_custom_options() -> Result<(), ParseError> {
        let options = ThemeOptions::builder()
            .seed("brand", Color::from_hex("#6c50ff")?)
            .role("surface", |base, _| base.clone())
            .role("inverse", |base, _| base.invert(1.0))
            .states(Vec::new())
            .state("pressed", |base, _| base.with_alpha(Some(0.5)))
            .build();
        assert_eq!(
            options.role_names().collect::<Vec<_>>(),
            vec!["surface", "default", "emphasis", "interactive", "inverse"]
        );
        assert_eq!(options.state_names().collect::<Vec<_>>(), vec!["pressed"]);

        let theme = Theme::new(&options);
        let surface = theme.get("brand", "surface", "pressed").unwrap();
        assert_eq!(
            surface.background,
            Color::from_hex("#6c50ff")?.with_alpha(Some(0.5))
        );
        assert!(theme.get("brand", "surface", "default").is_none());
        assert!(theme.get("brand", "inverse", "pressed").is_some());

        let dark = options.to_builder().dark(true).build();
        assert!(dark.dark());
        assert!(!options.dark());
        Ok(())
    }

    #[test]
    fn test_seed_alpha() -> Result<(), ParseError> {
        let options = ThemeOptions::builder()
            .seed("glass", Color::from_hex("#6c50ff80")?)
            .build();
        let theme = Theme::new(&options);
        let hover = theme.get("glass", "interactive", "hover").unwrap();
        assert_eq!(hover.background.alpha(), Color::from_hex("#6c50ff80")?.alpha());
        Ok(())
    }

    #[test]
    fn test_empty() {
        let theme = Theme::new(&ThemeOptions::default());
        assert_eq!(theme.colors().count(), 0);
        assert_eq!(*ThemeOptions::default().contrast(), ContrastOptions::THEME);
    }
}
