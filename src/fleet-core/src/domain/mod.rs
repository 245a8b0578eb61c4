mod diagnostics;
mod environment;
mod fuel;
mod input;
mod integrated;
mod maintenance;
mod metrics;
mod navigation;
mod summary;
mod vessels;

pub use diagnostics::*;
pub use environment::*;
pub use fuel::*;
pub use input::*;
pub use integrated::*;
pub use maintenance::*;
pub use metrics::*;
pub use navigation::*;
pub use summary::*;
pub use vessels::*;

/// Total ordering for optional floats, `None` sorts first.
pub(crate) fn cmp_opt_f64(a: Option<f64>, b: Option<f64>) -> std::cmp::Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.total_cmp(&b),
        (a, b) => a.is_some().cmp(&b.is_some()),
    }
}
