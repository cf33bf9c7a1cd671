//! Mount/unmount boundary for the embedded external widget.

use log::info;

/// A heavyweight component the page embeds but does not own.
///
/// Mounting needs no input. Unmounting is dropping the returned instance:
/// the instance cleans up after itself in `Drop`, and nothing is carried
/// over to the next mount.
pub trait ExternalWidget {
    type Instance;

    fn mount(&mut self) -> Self::Instance;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WidgetTransition {
    Mounted,
    Unmounted,
    Unchanged,
}

/// Holds at most one live widget instance.
pub struct WidgetSlot<W: ExternalWidget> {
    widget: W,
    instance: Option<W::Instance>,
}

impl<W: ExternalWidget> WidgetSlot<W> {
    pub fn new(widget: W) -> Self {
        Self {
            widget,
            instance: None,
        }
    }

    pub fn is_mounted(&self) -> bool {
        self.instance.is_some()
    }

    /// Mount or unmount so that the slot matches `should_mount`.
    pub fn sync(&mut self, should_mount: bool) -> WidgetTransition {
        match (should_mount, self.instance.is_some()) {
            (true, false) => {
                self.instance = Some(self.widget.mount());
                info!("external widget mounted");
                WidgetTransition::Mounted
            }
            (false, true) => {
                self.instance = None;
                info!("external widget unmounted");
                WidgetTransition::Unmounted
            }
            _ => WidgetTransition::Unchanged,
        }
    }

    pub fn unmount(&mut self) -> bool {
        self.sync(false) == WidgetTransition::Unmounted
    }

    pub fn instance(&self) -> Option<&W::Instance> {
        self.instance.as_ref()
    }

    pub fn widget(&self) -> &W {
        &self.widget
    }
}
