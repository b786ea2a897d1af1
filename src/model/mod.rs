//! Domain model — the personalization record, its persistence, and the
//! date arithmetic behind the countdown. Nothing in here touches the DOM.

pub mod countdown;
pub mod dates;
pub mod state;
pub mod store;
