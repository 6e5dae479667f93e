use bigdecimal::BigDecimal;
use uuid::Uuid;

use crate::domain::errors::DomainError;
use crate::domain::order::{LineItem, OrderDraft};
use crate::domain::ports::OrderRepository;
use crate::domain::totals::OrderTotals;

/// Tax rate and fallback shipping fee applied to every order of the deployment.
#[derive(Debug, Clone, PartialEq)]
pub struct PricingConfig {
    pub tax_rate: BigDecimal,
    pub default_shipping_fee: BigDecimal,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PricedOrder {
    pub draft: OrderDraft,
    pub totals: OrderTotals,
}

pub struct OrderService<R> {
    repo: R,
    pricing: PricingConfig,
}

impl<R: OrderRepository> OrderService<R> {
    pub fn new(repo: R, pricing: PricingConfig) -> Self {
        Self { repo, pricing }
    }

    pub fn pricing(&self) -> &PricingConfig {
        &self.pricing
    }

    /// Totals for a draft that is not stored. Only its amounts are checked.
    pub fn quote(&self, draft: &OrderDraft) -> Result<OrderTotals, DomainError> {
        draft.validate_amounts()?;
        Ok(draft.totals(&self.pricing.tax_rate))
    }

    pub fn get_order(&self, store_id: Uuid, id: Uuid) -> Result<PricedOrder, DomainError> {
        let draft = self
            .repo
            .find_by_id(store_id, id)?
            .ok_or(DomainError::NotFound("Order"))?;
        Ok(self.priced(draft))
    }

    pub fn create_order(
        &self,
        store_id: Uuid,
        draft: OrderDraft,
    ) -> Result<(Uuid, String), DomainError> {
        draft.validate()?;
        let (id, code) = self.repo.create(store_id, &draft)?;
        log::info!("Created order {} ({}) for store {}", code, id, store_id);
        Ok((id, code))
    }

    /// Replace an existing order with the submitted draft. The order keeps
    /// its id and number.
    pub fn update_order(
        &self,
        store_id: Uuid,
        id: Uuid,
        draft: OrderDraft,
    ) -> Result<PricedOrder, DomainError> {
        draft.validate()?;
        let stored = self.repo.modify(
            store_id,
            id,
            Box::new(move |current: &mut OrderDraft| -> Result<(), DomainError> {
                *current = OrderDraft {
                    id: current.id,
                    code: current.code.take(),
                    ..draft
                };
                Ok(())
            }),
        )?;
        log::info!("Updated order {} for store {}", id, store_id);
        Ok(self.priced(stored))
    }

    pub fn add_item(
        &self,
        store_id: Uuid,
        id: Uuid,
        item: LineItem,
    ) -> Result<PricedOrder, DomainError> {
        let stored = self.repo.modify(
            store_id,
            id,
            Box::new(move |draft: &mut OrderDraft| {
                draft.add_item(item)?;
                draft.validate()
            }),
        )?;
        Ok(self.priced(stored))
    }

    pub fn remove_item(
        &self,
        store_id: Uuid,
        id: Uuid,
        code: &str,
    ) -> Result<PricedOrder, DomainError> {
        let stored = self.repo.modify(
            store_id,
            id,
            Box::new(|draft: &mut OrderDraft| -> Result<(), DomainError> {
                draft.remove_item(code);
                Ok(())
            }),
        )?;
        Ok(self.priced(stored))
    }

    fn priced(&self, draft: OrderDraft) -> PricedOrder {
        PricedOrder {
            totals: draft.totals(&self.pricing.tax_rate),
            draft,
        }
    }
}
