//! Interaction graph page: server picker, rebuild trigger and embedded graph.
//!
//! State transitions are kept free of browser calls in [`state`], so the
//! page's behaviour can be exercised without a DOM. The component in
//! `component` wires those transitions to DOM events and backend requests.

mod component;
pub mod state;

pub use component::InteractionGraphView;
pub use state::{Command, ViewEvent, ViewState};
