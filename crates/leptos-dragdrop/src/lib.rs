//! Leptos DragDrop Utilities
//!
//! Mouse-event drag-and-drop between ordered lists.
//! Uses movement threshold to distinguish click from drag.
//!
//! Lists are identified by a static key (e.g. `"todoList"`). A drag starts
//! from a [`DragSource`] (list + index) and ends on a [`DropSlot`], an
//! insertion point "before index N" in some list. Slots at `len` mean
//! "append". Converting a slot into a final index is left to the caller,
//! since that depends on whether the source and target list are the same.

use leptos::ev;
use leptos::prelude::*;
use wasm_bindgen::JsCast;

/// Identifier of a droppable list
pub type ListKey = &'static str;

/// Where a drag started
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DragSource {
    pub list: ListKey,
    pub index: usize,
}

/// Insertion point: the dragged element goes before `index` in `list`
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DropSlot {
    pub list: ListKey,
    pub index: usize,
}

/// DnD state signals
#[derive(Clone, Copy)]
pub struct DndSignals {
    pub dragging_read: ReadSignal<Option<DragSource>>,
    pub dragging_write: WriteSignal<Option<DragSource>>,
    pub drop_target_read: ReadSignal<Option<DropSlot>>,
    pub drop_target_write: WriteSignal<Option<DropSlot>>,
    pub drag_just_ended_read: ReadSignal<bool>,
    pub drag_just_ended_write: WriteSignal<bool>,
    /// Pending source (mousedown but not yet dragging)
    pub pending_read: ReadSignal<Option<DragSource>>,
    pub pending_write: WriteSignal<Option<DragSource>>,
    /// Start position for movement detection
    pub start_x_read: ReadSignal<i32>,
    pub start_x_write: WriteSignal<i32>,
    pub start_y_read: ReadSignal<i32>,
    pub start_y_write: WriteSignal<i32>,
}

impl DndSignals {
    /// Is `source` the element currently being dragged?
    pub fn is_dragging(&self, source: DragSource) -> bool {
        self.dragging_read.get() == Some(source)
    }

    /// Is any drag in progress?
    pub fn is_active(&self) -> bool {
        self.dragging_read.get().is_some()
    }

    /// Is `slot` the current drop target?
    pub fn is_target(&self, slot: DropSlot) -> bool {
        self.drop_target_read.get() == Some(slot)
    }
}

/// Movement threshold in pixels to start dragging
const DRAG_THRESHOLD_PX: i32 = 5;

/// Milliseconds during which clicks are swallowed after a drag ends
const CLICK_SUPPRESS_MS: i32 = 100;

pub fn create_dnd_signals() -> DndSignals {
    let (dragging_read, dragging_write) = signal(None::<DragSource>);
    let (drop_target_read, drop_target_write) = signal(None::<DropSlot>);
    let (drag_just_ended_read, drag_just_ended_write) = signal(false);
    let (pending_read, pending_write) = signal(None::<DragSource>);
    let (start_x_read, start_x_write) = signal(0i32);
    let (start_y_read, start_y_write) = signal(0i32);
    DndSignals {
        dragging_read,
        dragging_write,
        drop_target_read,
        drop_target_write,
        drag_just_ended_read,
        drag_just_ended_write,
        pending_read,
        pending_write,
        start_x_read,
        start_x_write,
        start_y_read,
        start_y_write,
    }
}

/// Did the pointer move far enough from the mousedown point to count as a drag?
pub fn exceeds_threshold(start: (i32, i32), current: (i32, i32)) -> bool {
    let dx = (current.0 - start.0).abs();
    let dy = (current.1 - start.1).abs();
    dx > DRAG_THRESHOLD_PX || dy > DRAG_THRESHOLD_PX
}

/// What a mouseup means for the drag state
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Release {
    /// A real drag ended, so the click that follows must be swallowed
    pub suppress_click: bool,
    /// Source and target of a completed drop
    pub drop: Option<(DragSource, DropSlot)>,
}

/// Decide what releasing the mouse does. Only an actual drag suppresses the
/// following click; a press that never crossed the threshold is a plain click.
pub fn release(dragging: Option<DragSource>, target: Option<DropSlot>) -> Release {
    match dragging {
        Some(source) => Release {
            suppress_click: true,
            drop: target.map(|slot| (source, slot)),
        },
        None => Release { suppress_click: false, drop: None },
    }
}

/// End drag operation
pub fn end_drag(dnd: &DndSignals) {
    dnd.dragging_write.set(None);
    dnd.drop_target_write.set(None);
    dnd.pending_write.set(None);
    dnd.drag_just_ended_write.set(true);

    if let Some(win) = web_sys::window() {
        let clear = dnd.drag_just_ended_write;
        let cb = wasm_bindgen::closure::Closure::<dyn FnMut()>::new(move || {
            clear.set(false);
        });
        let _ = win.set_timeout_with_callback_and_timeout_and_arguments_0(cb.as_ref().unchecked_ref(), CLICK_SUPPRESS_MS);
        cb.forget();
    }
}

/// Create mousedown handler for draggable elements
/// Records pending drag with start position
pub fn make_on_mousedown(dnd: DndSignals, source: DragSource) -> impl Fn(web_sys::MouseEvent) + Copy + 'static {
    move |ev: web_sys::MouseEvent| {
        if ev.button() == 0 {
            // Ignore if target is input or button
            if let Some(target) = ev.target() {
                if target.dyn_ref::<web_sys::HtmlInputElement>().is_some() { return; }
                if target.dyn_ref::<web_sys::HtmlButtonElement>().is_some() { return; }
            }
            dnd.pending_write.set(Some(source));
            dnd.start_x_write.set(ev.client_x());
            dnd.start_y_write.set(ev.client_y());
        }
    }
}

/// Create mouseenter handler for list elements: hovering element `index`
/// targets the slot just before it
pub fn make_on_item_mouseenter(dnd: DndSignals, list: ListKey, index: usize) -> impl Fn(web_sys::MouseEvent) + Copy + 'static {
    move |_ev: web_sys::MouseEvent| {
        if let Some(dragging) = dnd.dragging_read.get_untracked() {
            // Hovering the dragged element itself is not a target
            if dragging.list == list && dragging.index == index {
                dnd.drop_target_write.set(None);
            } else {
                dnd.drop_target_write.set(Some(DropSlot { list, index }));
            }
        }
    }
}

/// Create mouseenter handler for explicit drop zones
pub fn make_on_zone_mouseenter(dnd: DndSignals, slot: DropSlot) -> impl Fn(web_sys::MouseEvent) + Copy + 'static {
    move |_ev: web_sys::MouseEvent| {
        if dnd.dragging_read.get_untracked().is_some() {
            dnd.drop_target_write.set(Some(slot));
        }
    }
}

/// Create mouseleave handler
pub fn make_on_mouseleave(dnd: DndSignals) -> impl Fn(web_sys::MouseEvent) + Copy + 'static {
    move |_ev: web_sys::MouseEvent| {
        if dnd.dragging_read.get_untracked().is_some() {
            dnd.drop_target_write.set(None);
        }
    }
}

/// Bind window mousemove/mouseup handlers for the lifetime of the calling
/// component. `on_drop` fires once per completed drag with its source and
/// target slot; releasing outside any slot cancels the drag.
pub fn bind_global_handlers<F>(dnd: DndSignals, on_drop: F)
where
    F: Fn(DragSource, DropSlot) + 'static,
{
    let mousemove = window_event_listener(ev::mousemove, move |ev: web_sys::MouseEvent| {
        let pending = dnd.pending_read.get_untracked();

        // If we have a pending drag and haven't started dragging yet
        if pending.is_some() && dnd.dragging_read.get_untracked().is_none() {
            let start = (dnd.start_x_read.get_untracked(), dnd.start_y_read.get_untracked());
            if exceeds_threshold(start, (ev.client_x(), ev.client_y())) {
                dnd.dragging_write.set(pending);
            }
        }
    });

    let mouseup = window_event_listener(ev::mouseup, move |_ev: web_sys::MouseEvent| {
        let outcome = release(dnd.dragging_read.get_untracked(), dnd.drop_target_read.get_untracked());

        if !outcome.suppress_click {
            // Plain click: let the element's own click handler run
            dnd.pending_write.set(None);
            return;
        }
        end_drag(&dnd);
        if let Some((source, slot)) = outcome.drop {
            on_drop(source, slot);
        }
    });

    on_cleanup(move || {
        mousemove.remove();
        mouseup.remove();
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_threshold_ignores_small_jitter() {
        assert!(!exceeds_threshold((100, 100), (103, 98)));
        assert!(!exceeds_threshold((100, 100), (105, 105)));
    }

    #[test]
    fn test_threshold_starts_drag_on_either_axis() {
        assert!(exceeds_threshold((100, 100), (106, 100)));
        assert!(exceeds_threshold((100, 100), (100, 90)));
    }

    #[test]
    fn test_plain_click_is_not_suppressed() {
        let outcome = release(None, None);
        assert!(!outcome.suppress_click);
        assert_eq!(outcome.drop, None);

        // A stale target without a drag never produces a drop
        let outcome = release(None, Some(DropSlot { list: "todoList", index: 0 }));
        assert!(!outcome.suppress_click);
        assert_eq!(outcome.drop, None);
    }

    #[test]
    fn test_drag_release_suppresses_click() {
        let source = DragSource { list: "todoList", index: 2 };
        let slot = DropSlot { list: "completedList", index: 0 };

        let dropped = release(Some(source), Some(slot));
        assert!(dropped.suppress_click);
        assert_eq!(dropped.drop, Some((source, slot)));

        // Released outside any zone: cancelled, but still not a click
        let cancelled = release(Some(source), None);
        assert!(cancelled.suppress_click);
        assert_eq!(cancelled.drop, None);
    }
}
