use std::fmt;

use deck_ui_layout::LayoutError;

use crate::ViewId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewError {
    Missing { id: ViewId },
    NoSuperview { id: ViewId },
    WouldCreateCycle { parent: ViewId, child: ViewId },
    Layout(LayoutError),
}

impl fmt::Display for ViewError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ViewError::Missing { id } => write!(f, "view {id} missing"),
            ViewError::NoSuperview { id } => write!(f, "view {id} has no superview"),
            ViewError::WouldCreateCycle { parent, child } => {
                write!(f, "adding {child} to {parent} would create a cycle")
            }
            ViewError::Layout(err) => write!(f, "layout: {err}"),
        }
    }
}

impl std::error::Error for ViewError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ViewError::Layout(err) => Some(err),
            _ => None,
        }
    }
}

impl From<LayoutError> for ViewError {
    fn from(err: LayoutError) -> Self {
        ViewError::Layout(err)
    }
}
