//! Card geometry for a given container size.

use deck_ui::{ViewError, ViewId, ViewTree};
use deck_ui_graphics::{MaskedCorners, Rect, Size, Transform};

use crate::DeckConfig;

/// Frame of the presented card inside a container of `container` size.
pub fn presented_frame(container: Size, config: &DeckConfig) -> Rect {
    Rect::new(
        0.0,
        config.top_offset,
        container.width,
        (container.height - config.top_offset).max(0.0),
    )
}

/// Resting place of the card after dismissal: just below the container.
pub fn offscreen_frame(container: Size) -> Rect {
    Rect::new(0.0, container.height, container.width, container.height)
}

/// Scale applied to the presenting view while the card dismisses.
pub fn dismissal_scale(presenting_height: f32, config: &DeckConfig) -> f32 {
    if presenting_height <= 0.0 {
        return 1.0;
    }
    1.0 - config.snapshot_vertical_margin / presenting_height
}

/// Container height that compensates for a status bar of
/// `status_bar_height` points on a screen `full_height` tall.
pub fn container_height_for_status_bar(
    full_height: f32,
    status_bar_height: f32,
    config: &DeckConfig,
) -> f32 {
    full_height - (status_bar_height - config.baseline_status_bar_height)
}

/// Round the card's top corners.
pub fn round_top_corners(
    tree: &mut ViewTree,
    view: ViewId,
    config: &DeckConfig,
) -> Result<(), ViewError> {
    let node = tree.node_mut(view)?;
    node.corner_radius = config.corner_radius;
    node.masked_corners = MaskedCorners::TOP;
    node.clips_to_bounds = true;
    Ok(())
}

/// Lay the card out for the container's current bounds and round it.
pub fn layout_presented(
    tree: &mut ViewTree,
    presented: ViewId,
    container: ViewId,
    config: &DeckConfig,
) -> Result<Rect, ViewError> {
    let size = tree.node(container)?.frame.size();
    let frame = presented_frame(size, config);
    tree.node_mut(presented)?.frame = frame;
    round_top_corners(tree, presented, config)?;
    Ok(frame)
}

/// Put the presenting view back to full size with square corners.
pub fn restore_presenting(
    tree: &mut ViewTree,
    presenting: ViewId,
    container: ViewId,
) -> Result<(), ViewError> {
    let bounds = tree.node(container)?.bounds();
    let node = tree.node_mut(presenting)?;
    node.frame = bounds;
    node.transform = Transform::IDENTITY;
    node.corner_radius = 0.0;
    Ok(())
}

/// Park the card below the container so it can be presented again.
pub fn park_presented(
    tree: &mut ViewTree,
    presented: ViewId,
    container: ViewId,
) -> Result<(), ViewError> {
    let size = tree.node(container)?.frame.size();
    let node = tree.node_mut(presented)?;
    node.frame = offscreen_frame(size);
    node.transform = Transform::IDENTITY;
    Ok(())
}

#[cfg(test)]
#[path = "tests/geometry_tests.rs"]
mod tests;
