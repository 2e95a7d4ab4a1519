//! Bullet style controls shown in the block toolbar.

use crate::render::BulletStyle;

/// One toolbar button.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolbarControl {
    pub style: BulletStyle,
    /// Dashicon name
    pub icon: &'static str,
    pub label: &'static str,
    pub is_active: bool,
}

/// Styles offered in the toolbar; `none` is reached by deselecting.
const TOOLBAR_STYLES: [BulletStyle; 2] = [BulletStyle::Disc, BulletStyle::Decimal];

pub fn toolbar_controls(selected: BulletStyle) -> Vec<ToolbarControl> {
    TOOLBAR_STYLES
        .iter()
        .map(|&style| ToolbarControl {
            style,
            icon: icon(style),
            label: label(style),
            is_active: style == selected,
        })
        .collect()
}

fn icon(style: BulletStyle) -> &'static str {
    match style {
        BulletStyle::Decimal => "editor-ol",
        _ => "editor-ul",
    }
}

fn label(style: BulletStyle) -> &'static str {
    match style {
        BulletStyle::Decimal => "Numbered list",
        _ => "Bulleted list",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offers_disc_and_decimal() {
        let controls = toolbar_controls(BulletStyle::None);
        assert_eq!(controls.len(), 2);
        assert_eq!(controls[0].style, BulletStyle::Disc);
        assert_eq!(controls[0].icon, "editor-ul");
        assert_eq!(controls[0].label, "Bulleted list");
        assert_eq!(controls[1].style, BulletStyle::Decimal);
        assert_eq!(controls[1].icon, "editor-ol");
        assert_eq!(controls[1].label, "Numbered list");
        assert!(controls.iter().all(|c| !c.is_active));
    }

    #[test]
    fn marks_selected_style_active() {
        let controls = toolbar_controls(BulletStyle::Decimal);
        assert!(!controls[0].is_active);
        assert!(controls[1].is_active);
    }
}
