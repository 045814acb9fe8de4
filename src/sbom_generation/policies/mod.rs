mod hash_policy;
mod license_policy;
mod reference_policy;

pub use hash_policy::HashPolicy;
pub use license_policy::LicensePolicy;
pub use reference_policy::ReferencePolicy;
