//! Household ledger service.
//!
//! Implements the [`HouseholdCommand`] and [`HouseholdQuery`] driving ports on
//! top of a [`HouseholdRepository`]. Commands run the role policy first and
//! never reach storage for a denied actor.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, warn};

use crate::domain::ports::{
    HouseholdCommand, HouseholdQuery, HouseholdRepository, HouseholdRepositoryError,
    RecordIdGenerator, RecordMealsRequest, RentStatus, ShoppingItemDraft,
};
use crate::domain::{
    Amount, BillingMonth, Error, LedgerSnapshot, MealCount, MealEntry, Member, MemberId,
    MemberName, MemberRole, MonthlyCosts, Permission, RecordId, RentCost, RentPayment,
    ShoppingItem, User, allocate_monthly_costs, authorize, find_orphaned_records,
};

fn map_repository_error(error: HouseholdRepositoryError) -> Error {
    match error {
        HouseholdRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("household repository unavailable: {message}"))
        }
        HouseholdRepositoryError::Query { message }
        | HouseholdRepositoryError::Serialization { message } => {
            Error::internal(format!("household repository error: {message}"))
        }
    }
}

fn actor_name(actor: &User) -> String {
    actor.username().to_string()
}

/// Ledger service implementing the household driving ports.
#[derive(Clone)]
pub struct HouseholdService<R> {
    repo: Arc<R>,
    ids: Arc<dyn RecordIdGenerator>,
}

impl<R> HouseholdService<R> {
    /// Create a service over `repo`, minting new identifiers from `ids`.
    pub fn new(repo: Arc<R>, ids: Arc<dyn RecordIdGenerator>) -> Self {
        Self { repo, ids }
    }
}

impl<R> HouseholdService<R>
where
    R: HouseholdRepository,
{
    async fn require_member(&self, member_id: &MemberId) -> Result<Member, Error> {
        self.repo
            .find_member(member_id)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| Error::not_found(format!("member {member_id} not found")))
    }

    async fn load(&self) -> Result<LedgerSnapshot, Error> {
        self.repo.load_ledger().await.map_err(map_repository_error)
    }
}

#[async_trait]
impl<R> HouseholdCommand for HouseholdService<R>
where
    R: HouseholdRepository,
{
    async fn add_member(&self, actor: &User, name: MemberName) -> Result<Member, Error> {
        authorize(actor, Permission::CreateMembers)?;
        let member = Member {
            id: MemberId::from(self.ids.next_id()),
            name,
            role: MemberRole::default(),
            created_by: actor_name(actor),
        };
        self.repo
            .save_member(&member)
            .await
            .map_err(map_repository_error)?;
        info!(member_id = %member.id, actor = %actor.username(), "member added");
        Ok(member)
    }

    async fn update_member_role(
        &self,
        actor: &User,
        member_id: &MemberId,
        role: MemberRole,
    ) -> Result<Member, Error> {
        authorize(actor, Permission::ChangeMemberRoles)?;
        let mut member = self.require_member(member_id).await?;
        member.role = role;
        self.repo
            .save_member(&member)
            .await
            .map_err(map_repository_error)?;
        info!(member_id = %member.id, role = %role, "member role changed");
        Ok(member)
    }

    async fn record_meals(
        &self,
        actor: &User,
        request: RecordMealsRequest,
    ) -> Result<MealEntry, Error> {
        authorize(actor, Permission::EditLedger)?;
        self.require_member(&request.member_id).await?;
        let existing = self
            .repo
            .find_meal_entry_for_day(&request.member_id, &request.date)
            .await
            .map_err(map_repository_error)?;
        let entry = match existing {
            Some(mut entry) => {
                entry.count = request.count;
                entry.updated_by = actor_name(actor);
                entry
            }
            None => MealEntry {
                id: RecordId::from(self.ids.next_id()),
                member_id: request.member_id,
                date: request.date,
                count: request.count,
                created_by: actor_name(actor),
                updated_by: actor_name(actor),
            },
        };
        self.repo
            .save_meal_entry(&entry)
            .await
            .map_err(map_repository_error)?;
        Ok(entry)
    }

    async fn update_meal_count(
        &self,
        actor: &User,
        entry_id: &RecordId,
        count: MealCount,
    ) -> Result<MealEntry, Error> {
        authorize(actor, Permission::EditLedger)?;
        let mut entry = self
            .repo
            .find_meal_entry(entry_id)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| Error::not_found(format!("meal entry {entry_id} not found")))?;
        entry.count = count;
        entry.updated_by = actor_name(actor);
        self.repo
            .save_meal_entry(&entry)
            .await
            .map_err(map_repository_error)?;
        Ok(entry)
    }

    async fn delete_meal_entry(&self, actor: &User, entry_id: &RecordId) -> Result<(), Error> {
        authorize(actor, Permission::EditLedger)?;
        let deleted = self
            .repo
            .delete_meal_entry(entry_id)
            .await
            .map_err(map_repository_error)?;
        if deleted {
            Ok(())
        } else {
            Err(Error::not_found(format!("meal entry {entry_id} not found")))
        }
    }

    async fn add_shopping_item(
        &self,
        actor: &User,
        draft: ShoppingItemDraft,
    ) -> Result<ShoppingItem, Error> {
        authorize(actor, Permission::EditLedger)?;
        let item = ShoppingItem {
            id: RecordId::from(self.ids.next_id()),
            name: draft.name,
            cost: draft.cost,
            date: draft.date,
            created_by: actor_name(actor),
            updated_by: actor_name(actor),
        };
        self.repo
            .save_shopping_item(&item)
            .await
            .map_err(map_repository_error)?;
        Ok(item)
    }

    async fn update_shopping_item(
        &self,
        actor: &User,
        item_id: &RecordId,
        draft: ShoppingItemDraft,
    ) -> Result<ShoppingItem, Error> {
        authorize(actor, Permission::EditLedger)?;
        let mut item = self
            .repo
            .find_shopping_item(item_id)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| Error::not_found(format!("shopping item {item_id} not found")))?;
        item.name = draft.name;
        item.cost = draft.cost;
        item.date = draft.date;
        item.updated_by = actor_name(actor);
        self.repo
            .save_shopping_item(&item)
            .await
            .map_err(map_repository_error)?;
        Ok(item)
    }

    async fn delete_shopping_item(&self, actor: &User, item_id: &RecordId) -> Result<(), Error> {
        authorize(actor, Permission::EditLedger)?;
        let deleted = self
            .repo
            .delete_shopping_item(item_id)
            .await
            .map_err(map_repository_error)?;
        if deleted {
            Ok(())
        } else {
            Err(Error::not_found(format!("shopping item {item_id} not found")))
        }
    }

    async fn set_rent(
        &self,
        actor: &User,
        month: &BillingMonth,
        amount: Amount,
    ) -> Result<RentCost, Error> {
        authorize(actor, Permission::EditLedger)?;
        let existing = self
            .repo
            .find_rent_cost(month)
            .await
            .map_err(map_repository_error)?;
        let rent = match existing {
            Some(mut rent) => {
                rent.amount = amount;
                rent
            }
            None => RentCost {
                id: RecordId::from(self.ids.next_id()),
                month: month.as_str().to_owned(),
                amount,
                created_by: actor_name(actor),
            },
        };
        self.repo
            .save_rent_cost(&rent)
            .await
            .map_err(map_repository_error)?;
        info!(month = %month, amount = %rent.amount, "rent set");
        Ok(rent)
    }

    async fn toggle_rent_payment(
        &self,
        actor: &User,
        member_id: &MemberId,
        month: &BillingMonth,
    ) -> Result<RentPayment, Error> {
        authorize(actor, Permission::EditLedger)?;
        self.require_member(member_id).await?;
        let month_key = month.first_day_key();
        let existing = self
            .repo
            .find_rent_payment(member_id, &month_key)
            .await
            .map_err(map_repository_error)?;
        let payment = match existing {
            Some(mut payment) => {
                payment.paid = !payment.paid;
                payment
            }
            None => RentPayment {
                id: RecordId::from(self.ids.next_id()),
                member_id: member_id.clone(),
                month: month_key,
                paid: true,
                created_by: actor_name(actor),
            },
        };
        self.repo
            .save_rent_payment(&payment)
            .await
            .map_err(map_repository_error)?;
        info!(member_id = %member_id, month = %month, paid = payment.paid, "rent payment toggled");
        Ok(payment)
    }
}

#[async_trait]
impl<R> HouseholdQuery for HouseholdService<R>
where
    R: HouseholdRepository,
{
    async fn ledger(&self) -> Result<LedgerSnapshot, Error> {
        self.load().await
    }

    async fn member_meals(
        &self,
        member_id: &MemberId,
        month: &BillingMonth,
    ) -> Result<Vec<MealEntry>, Error> {
        let ledger = self.load().await?;
        if !ledger.members.iter().any(|member| &member.id == member_id) {
            return Err(Error::not_found(format!("member {member_id} not found")));
        }
        let mut entries: Vec<_> = ledger
            .meal_entries
            .into_iter()
            .filter(|entry| &entry.member_id == member_id && month.contains(&entry.date))
            .collect();
        entries.sort_by(|left, right| left.date.cmp(&right.date));
        Ok(entries)
    }

    async fn rent_status(&self, month: &BillingMonth) -> Result<Vec<RentStatus>, Error> {
        let ledger = self.load().await?;
        let month_key = month.first_day_key();
        Ok(ledger
            .members
            .into_iter()
            .map(|member| {
                let paid = ledger.rent_payments.iter().any(|payment| {
                    payment.member_id == member.id && payment.month == month_key && payment.paid
                });
                RentStatus {
                    member_id: member.id,
                    name: member.name,
                    paid,
                }
            })
            .collect())
    }

    async fn monthly_costs(&self, month: &BillingMonth) -> Result<MonthlyCosts, Error> {
        let ledger = self.load().await?;
        let orphans = find_orphaned_records(&ledger, month);
        if !orphans.is_empty() {
            warn!(
                month = %month,
                orphaned_meal_entries = orphans.meal_entry_ids.len(),
                orphaned_rent_payments = orphans.rent_payment_ids.len(),
                "ledger rows reference missing members; their meals still count towards the per-meal rate"
            );
        }
        Ok(allocate_monthly_costs(&ledger, month))
    }
}

#[cfg(test)]
#[path = "household_service_tests.rs"]
mod tests;
