//! First-run help overlay.

use maud::{Markup, html};
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// Browser storage key holding `"1"` once the user opts out of the help.
pub const HELP_STORAGE_KEY: &str = "d12_map_help_dismissed_v1";

/// The kind of pointing input the browser reports.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum InputProfile {
    /// Mouse or trackpad only.
    #[default]
    Desktop,
    /// Touch only.
    Mobile,
    /// Touch and a hovering pointer, e.g. a tablet with a mouse.
    Hybrid,
}

impl InputProfile {
    /// Classifies the device from its media-query and user agent hints.
    ///
    /// `any_coarse` is `(any-pointer: coarse)`, `any_hover` is
    /// `(any-hover: hover)`. Hybrid wins over mobile.
    #[must_use]
    pub const fn detect(any_coarse: bool, any_hover: bool, ua_mobile: bool) -> Self {
        if any_coarse && any_hover {
            Self::Hybrid
        } else if (any_coarse && !any_hover) || ua_mobile {
            Self::Mobile
        } else {
            Self::Desktop
        }
    }

    const fn heading(self) -> &'static str {
        match self {
            Self::Desktop => "How to use this map (Desktop)",
            Self::Mobile => "How to use this map (Mobile)",
            Self::Hybrid => "How to use this map (Mouse & Touch)",
        }
    }

    const fn instructions(self) -> &'static [(&'static str, &'static str)] {
        match self {
            Self::Desktop => &[
                ("Pan:", "left-click + drag"),
                ("Rotate / Tilt:", "right-click + drag (or Ctrl + left-drag)"),
                ("Zoom:", "mouse wheel / trackpad"),
                ("Details:", "click a circle"),
            ],
            Self::Mobile => &[
                ("Pan:", "drag with one finger"),
                ("Zoom:", "pinch with two fingers"),
                ("Rotate / Tilt:", "twist or two-finger drag"),
                ("Details:", "tap a circle"),
            ],
            Self::Hybrid => &[
                ("Pan:", "left-click + drag • or one-finger drag"),
                (
                    "Rotate/Tilt:",
                    "right-click + drag (or Ctrl + left-drag) • or two-finger drag",
                ),
                ("Zoom:", "mouse wheel/trackpad • or two-finger pinch"),
                ("Details:", "click/tap a circle"),
            ],
        }
    }
}

/// Whether the help should open, given the stored opt-out flag.
#[must_use]
pub fn should_show(dismissed: Option<&str>, force: bool) -> bool {
    force || dismissed != Some("1")
}

fn instructions(profile: InputProfile) -> Markup {
    html! {
        h3.title { (profile.heading()) }
        ul.list {
            @for (label, text) in profile.instructions() {
                li { b { (label) } " " (text) }
            }
        }
    }
}

/// The heading and instruction list for `profile`.
#[must_use]
pub fn help_html(profile: InputProfile) -> String {
    instructions(profile).into_string()
}

/// The full dialog: close button, instructions, opt-out checkbox and
/// confirm button.
#[must_use]
pub fn modal_html(profile: InputProfile) -> String {
    html! {
        div.maphelp_backdrop role="dialog" aria-modal="true" {
            div.maphelp_modal {
                button.maphelp_close aria-label="Close help" { "×" }
                (instructions(profile))
                div.actions {
                    label.remember {
                        input type="checkbox" id="maphelp_dont_show";
                        " Don’t show again"
                    }
                    button.ok { "Got it" }
                }
            }
        }
    }
    .into_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_profiles() {
        assert_eq!(InputProfile::detect(true, true, false), InputProfile::Hybrid);
        assert_eq!(InputProfile::detect(true, true, true), InputProfile::Hybrid);
        assert_eq!(InputProfile::detect(true, false, false), InputProfile::Mobile);
        assert_eq!(InputProfile::detect(false, true, true), InputProfile::Mobile);
        assert_eq!(InputProfile::detect(false, true, false), InputProfile::Desktop);
        assert_eq!(InputProfile::detect(false, false, false), InputProfile::Desktop);
    }

    #[test]
    fn dismissal_flag_gates_display() {
        assert!(should_show(None, false));
        assert!(should_show(Some("0"), false));
        assert!(!should_show(Some("1"), false));
        assert!(should_show(Some("1"), true));
    }

    #[test]
    fn instructions_match_profile() {
        let mobile = help_html(InputProfile::Mobile);
        assert!(mobile.contains("(Mobile)"), "{mobile}");
        assert!(mobile.contains("pinch with two fingers"));
        assert_eq!(mobile.matches("<li>").count(), 4);

        let hybrid = help_html(InputProfile::Hybrid);
        assert!(hybrid.contains("Mouse &amp; Touch"), "{hybrid}");
    }

    #[test]
    fn modal_has_controls() {
        let modal = modal_html(InputProfile::Desktop);
        assert!(modal.contains(r#"id="maphelp_dont_show""#), "{modal}");
        assert!(modal.contains("Got it"));
        assert!(modal.contains(r#"aria-label="Close help""#));
        assert!(modal.contains("left-click + drag"));
    }

    #[test]
    fn profile_parses_from_query_value() {
        assert_eq!("hybrid".parse::<InputProfile>().unwrap(), InputProfile::Hybrid);
    }
}
