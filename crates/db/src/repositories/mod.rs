//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that
//! accept `&PgPool` as the first argument. Associations between entities
//! are exposed as explicit finder functions.

pub mod category_repo;
pub mod city_repo;
pub mod configuration_repo;
pub mod subcategory_repo;
pub mod upload_repo;

pub use category_repo::CategoryRepo;
pub use city_repo::CityRepo;
pub use configuration_repo::ConfigurationRepo;
pub use subcategory_repo::SubcategoryRepo;
pub use upload_repo::UploadRepo;
