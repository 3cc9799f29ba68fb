use std::fmt;

use deck_foundation::RecognizerId;
use deck_ui_graphics::{Color, CornerRadii, MaskedCorners, Rect, Transform};
use smallvec::SmallVec;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ViewId(pub(crate) u64);

impl fmt::Display for ViewId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// What a view draws besides its background and subviews.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ViewContent {
    #[default]
    Plain,
    /// Live image of `source` captured at content `generation`.
    Snapshot { source: ViewId, generation: u64 },
}

/// A node in the [`ViewTree`](crate::ViewTree).
///
/// Layer properties are plain fields; hierarchy links are managed by the
/// tree and only readable from here.
#[derive(Clone, Debug)]
pub struct ViewNode {
    pub frame: Rect,
    pub transform: Transform,
    pub alpha: f32,
    pub background: Option<Color>,
    pub corner_radius: f32,
    pub masked_corners: MaskedCorners,
    pub mask: Option<ViewId>,
    pub clips_to_bounds: bool,
    pub content: ViewContent,
    pub label: &'static str,
    pub(crate) parent: Option<ViewId>,
    pub(crate) children: SmallVec<[ViewId; 4]>,
    pub(crate) recognizers: SmallVec<[RecognizerId; 1]>,
}

impl ViewNode {
    pub(crate) fn new(label: &'static str, frame: Rect) -> Self {
        Self {
            frame,
            transform: Transform::IDENTITY,
            alpha: 1.0,
            background: None,
            corner_radius: 0.0,
            masked_corners: MaskedCorners::ALL,
            mask: None,
            clips_to_bounds: false,
            content: ViewContent::Plain,
            label,
            parent: None,
            children: SmallVec::new(),
            recognizers: SmallVec::new(),
        }
    }

    pub fn parent(&self) -> Option<ViewId> {
        self.parent
    }

    /// Subviews, back to front.
    pub fn children(&self) -> &[ViewId] {
        &self.children
    }

    pub fn recognizers(&self) -> &[RecognizerId] {
        &self.recognizers
    }

    pub fn bounds(&self) -> Rect {
        self.frame.bounds()
    }

    /// Frame after applying the layer transform.
    pub fn visual_frame(&self) -> Rect {
        self.transform.apply_to_rect(self.frame)
    }

    pub fn corner_radii(&self) -> CornerRadii {
        CornerRadii::resolve(self.corner_radius, self.masked_corners, self.frame.size())
    }
}
