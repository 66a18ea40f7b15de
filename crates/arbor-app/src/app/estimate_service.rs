//! Estimate Service - the multi-step estimate workflow
//!
//! This service drives building an estimate:
//! 1. Record customer details
//! 2. Add and remove priced line items, choose haul-away
//! 3. Finalize into an immutable estimate
//! 4. Reset for the next customer
//!
//! All input is validated here, before it reaches the pricing engine.

use arbor_domain::service::validation::{
    ensure_has_items, parse_dimension, validate_cost, validate_customer, validate_line_item,
    validate_pricing, validate_truckloads,
};
use arbor_domain::service::{finalize_estimate, haul_away_cost, new_line_item, MINIMUM_CHARGE};
use arbor_domain::{EstimateDraft, SessionRepository, SettingsRepository};
use arbor_types::{
    new_item_id, CompanyInfo, CustomerInfo, Error, FinalizedEstimate, HaulAwaySelection, LineItem,
    PricingConfig, ServiceKind, ValidationError,
};
use chrono::NaiveDate;
use thiserror::Error;
use tracing::{debug, info};

/// Errors specific to the estimate service
#[derive(Debug, Error)]
pub enum EstimateServiceError {
    #[error("{0}")]
    Invalid(#[from] ValidationError),

    #[error("No line item matches {0:?}")]
    ItemNotFound(String),

    #[error("No finalized estimate yet, run `finalize` first")]
    NoEstimate,

    #[error("Store error: {0}")]
    Store(#[source] Error),
}

impl From<Error> for EstimateServiceError {
    fn from(err: Error) -> Self {
        match err {
            Error::Validation(e) => EstimateServiceError::Invalid(e),
            Error::ItemNotFound(id) => EstimateServiceError::ItemNotFound(id),
            Error::NoEstimate => EstimateServiceError::NoEstimate,
            other => EstimateServiceError::Store(other),
        }
    }
}

impl From<EstimateServiceError> for Error {
    fn from(err: EstimateServiceError) -> Self {
        match err {
            EstimateServiceError::Invalid(e) => Error::Validation(e),
            EstimateServiceError::ItemNotFound(id) => Error::ItemNotFound(id),
            EstimateServiceError::NoEstimate => Error::NoEstimate,
            EstimateServiceError::Store(err) => err,
        }
    }
}

pub type ServiceResult<T> = std::result::Result<T, EstimateServiceError>;

/// Workflow over a settings source and a session store
pub struct EstimateService<S, R> {
    settings: S,
    session: R,
}

impl<S, R> EstimateService<S, R>
where
    S: SettingsRepository,
    R: SessionRepository,
{
    pub fn new(settings: S, session: R) -> Self {
        Self { settings, session }
    }

    pub fn draft(&self) -> ServiceResult<EstimateDraft> {
        Ok(self.session.load_draft()?)
    }

    pub fn pricing(&self) -> ServiceResult<PricingConfig> {
        Ok(self.settings.pricing_config()?)
    }

    pub fn company(&self) -> ServiceResult<CompanyInfo> {
        Ok(self.settings.company_info()?)
    }

    /// Step 1: customer name and street address, both required
    pub fn set_customer(&mut self, name: &str, address: &str) -> ServiceResult<CustomerInfo> {
        let customer = CustomerInfo::new(name.trim(), address.trim());
        validate_customer(&customer)?;

        let mut draft = self.session.load_draft()?;
        draft.set_customer(customer.clone());
        self.session.save_draft(&draft)?;
        debug!(customer = %customer.name, "customer set");
        Ok(customer)
    }

    /// Add a line item priced at the current unit price
    pub fn add_item(
        &mut self,
        service: Option<ServiceKind>,
        dimension: f64,
        quantity: u32,
    ) -> ServiceResult<LineItem> {
        let valid = validate_line_item(service, dimension, quantity)?;
        let pricing = self.settings.pricing_config()?;
        let item = new_line_item(
            new_item_id(),
            valid.service,
            valid.dimension,
            valid.quantity,
            &pricing,
        );

        validate_cost("Line item cost", item.cost)?;

        let mut draft = self.session.load_draft()?;
        draft.push_item(item.clone());
        validate_cost("Estimate total", draft.running_total(&pricing))?;
        self.session.save_draft(&draft)?;
        info!(id = %item.id, service = ?item.service, cost = item.cost, "line item added");
        Ok(item)
    }

    /// Same as [`Self::add_item`], with the dimension as typed by the user
    pub fn add_item_from_input(
        &mut self,
        service: Option<ServiceKind>,
        dimension: &str,
        quantity: u32,
    ) -> ServiceResult<LineItem> {
        let dimension = parse_dimension(dimension)?;
        self.add_item(service, dimension, quantity)
    }

    /// Remove a line item by its id or a unique prefix of it
    pub fn remove_item(&mut self, id: &str) -> ServiceResult<LineItem> {
        let mut draft = self.session.load_draft()?;
        let full_id = resolve_item_id(&draft, id)?;
        let removed = draft
            .remove_item(&full_id)
            .ok_or_else(|| EstimateServiceError::ItemNotFound(id.to_string()))?;
        self.session.save_draft(&draft)?;
        info!(id = %removed.id, cost = removed.cost, "line item removed");
        Ok(removed)
    }

    /// Turn haul-away on with `truckloads`, or off.
    ///
    /// Turning it off keeps the truckload count already in the draft and
    /// ignores `truckloads`.
    pub fn set_haul_away(
        &mut self,
        included: bool,
        truckloads: u32,
    ) -> ServiceResult<HaulAwaySelection> {
        let mut draft = self.session.load_draft()?;
        let selection = if included {
            HaulAwaySelection::loads(validate_truckloads(truckloads)?)
        } else {
            HaulAwaySelection {
                included: false,
                truckloads: draft.haul_away.truckloads,
            }
        };

        let pricing = self.settings.pricing_config()?;
        validate_cost("Haul-away cost", haul_away_cost(&selection, &pricing))?;
        draft.set_haul_away(selection);
        validate_cost("Estimate total", draft.running_total(&pricing))?;

        self.session.save_draft(&draft)?;
        Ok(selection)
    }

    /// Draft total without the minimum charge floor
    pub fn running_total(&self) -> ServiceResult<f64> {
        let draft = self.session.load_draft()?;
        let pricing = self.settings.pricing_config()?;
        Ok(draft.running_total(&pricing))
    }

    /// Step 3: turn the draft into a finalized estimate dated `date`.
    ///
    /// Refuses an estimate without items or without customer details. The
    /// result replaces any previously finalized estimate.
    pub fn finalize(&mut self, date: NaiveDate) -> ServiceResult<FinalizedEstimate> {
        let draft = self.session.load_draft()?;
        ensure_has_items(&draft.line_items)?;
        validate_customer(&draft.customer_info)?;

        let pricing = self.settings.pricing_config()?;
        validate_cost("Estimate total", draft.running_total(&pricing))?;
        let company = self.settings.company_info()?;
        let estimate = finalize_estimate(
            &draft.line_items,
            draft.haul_away,
            &pricing,
            MINIMUM_CHARGE,
            draft.customer_info,
            company,
            date,
        );

        self.session.save_estimate(&estimate)?;
        info!(
            items = estimate.line_items.len(),
            sub_total = estimate.sub_total,
            final_total = estimate.final_total,
            minimum_charge_applied = estimate.minimum_charge_applied,
            "estimate finalized"
        );
        Ok(estimate)
    }

    pub fn current_estimate(&self) -> ServiceResult<FinalizedEstimate> {
        self.session
            .load_estimate()?
            .ok_or(EstimateServiceError::NoEstimate)
    }

    /// Start over with an empty draft
    pub fn reset(&mut self) -> ServiceResult<()> {
        self.session.clear()?;
        Ok(())
    }

    /// Save new prices and company details.
    ///
    /// Items already in the draft keep the cost they were priced at.
    pub fn update_settings(
        &mut self,
        pricing: &PricingConfig,
        company: &CompanyInfo,
    ) -> ServiceResult<()> {
        validate_pricing(pricing)?;
        self.settings.save(pricing, company)?;
        info!("settings updated");
        Ok(())
    }
}

fn resolve_item_id(draft: &EstimateDraft, id: &str) -> ServiceResult<String> {
    if draft.line_items.iter().any(|item| item.id == id) {
        return Ok(id.to_string());
    }
    if id.is_empty() {
        return Err(EstimateServiceError::ItemNotFound(id.to_string()));
    }

    let mut matches = draft
        .line_items
        .iter()
        .filter(|item| item.id.starts_with(id));
    match (matches.next(), matches.next()) {
        (Some(item), None) => Ok(item.id.clone()),
        _ => Err(EstimateServiceError::ItemNotFound(id.to_string())),
    }
}
