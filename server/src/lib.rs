pub mod id;
pub mod model;
pub mod routes;
pub mod store;

pub use id::ClientId;
pub use routes::{app, SharedCrm};
pub use store::{Crm, CrmError, Fixture};

#[cfg(test)]
#[ctor::ctor]
fn install_backtrace() {
    color_backtrace::install();
}
