mod range_selector;

pub use range_selector::{
    DetachedWindow, RangeSelector, SelectionOutcome, SelectionRect, SelectionState, SelectorEvent,
    SelectorKey, WindowHost, attach_range_selector,
};
