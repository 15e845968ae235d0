//! Interaction controllers: small gesture state machines that edit the
//! scene.
//!
//! A controller owns the id of the layer it manipulates plus whatever it
//! captured at gesture start, and writes through [`Scene::mutate`]. Each
//! gesture records exactly one undo step, taken lazily on the first
//! `Start`/`Move` sample, so hosts whose gesture sources have no explicit
//! start phase still get one entry per drag. `End` and `Cancel` both drop
//! the captured state; a sample that cannot be applied (unknown layer,
//! unresolved frame, unknown canvas size, forbidding policy) is ignored.
//!
//! [`Scene::mutate`]: crate::Scene::mutate

mod crop;
mod movement;
mod resize;
mod tap;

pub use crop::CropController;
pub use movement::MoveController;
pub use resize::ResizeController;
pub use tap::tap;
