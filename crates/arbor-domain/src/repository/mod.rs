//! Repository trait definitions for data persistence
//!
//! The pricing engine never touches these; callers read plain values from a
//! repository and pass them in.

use arbor_types::{CompanyInfo, Error, FinalizedEstimate, PricingConfig};

use crate::model::EstimateDraft;

/// Durable source of pricing and company details
pub trait SettingsRepository {
    fn pricing_config(&self) -> Result<PricingConfig, Error>;

    fn company_info(&self) -> Result<CompanyInfo, Error>;

    /// Replace both records and persist them
    fn save(&mut self, pricing: &PricingConfig, company: &CompanyInfo) -> Result<(), Error>;
}

/// Working state of the estimate being built, plus the last finalized one
pub trait SessionRepository {
    fn load_draft(&self) -> Result<EstimateDraft, Error>;

    fn save_draft(&mut self, draft: &EstimateDraft) -> Result<(), Error>;

    fn load_estimate(&self) -> Result<Option<FinalizedEstimate>, Error>;

    /// Store a newly finalized estimate, replacing any previous one
    fn save_estimate(&mut self, estimate: &FinalizedEstimate) -> Result<(), Error>;

    /// Drop the draft and the finalized estimate
    fn clear(&mut self) -> Result<(), Error>;
}
