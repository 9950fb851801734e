//! Admin form inputs, validated before any payload is composed.

use std::collections::HashSet;

use crate::catalog::{Reward, UnitId};
use crate::error::ComposeError;
use crate::resource::ResourceType;

fn require_text(value: &str, field: &'static str) -> Result<(), ComposeError> {
    if value.trim().is_empty() {
        return Err(ComposeError::MissingField(field));
    }
    Ok(())
}

fn require_nonzero(value: u64, field: &'static str) -> Result<(), ComposeError> {
    if value == 0 {
        return Err(ComposeError::MissingField(field));
    }
    Ok(())
}

/// New unit definition.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct UnitDraft {
    pub name: String,
    pub description: String,
    pub image_url: String,
    pub attack: u64,
    pub health: u64,
}

impl UnitDraft {
    pub fn validate(&self) -> Result<(), ComposeError> {
        require_text(&self.name, "name")?;
        require_text(&self.description, "description")?;
        require_text(&self.image_url, "image url")?;
        require_nonzero(self.attack, "attack")?;
        require_nonzero(self.health, "health")
    }
}

/// New purchase contract.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ContractDraft {
    pub payment: Option<ResourceType>,
    pub unit_id: Option<UnitId>,
    /// Unscaled integer multiplier.
    pub fixed_price: u64,
}

impl ContractDraft {
    pub fn validate(&self) -> Result<(&ResourceType, UnitId), ComposeError> {
        let payment = self
            .payment
            .as_ref()
            .ok_or(ComposeError::MissingField("payment resource"))?;
        let unit_id = self.unit_id.ok_or(ComposeError::MissingField("unit"))?;
        require_nonzero(self.fixed_price, "fixed price")?;
        Ok((payment, unit_id))
    }
}

/// New enemy level with one or two rewards.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LevelDraft {
    pub name: String,
    pub attack: u64,
    pub health: u64,
    pub rewards: Vec<Reward>,
}

impl LevelDraft {
    /// Checks every field except the reward count, which the variant
    /// selector owns.
    pub fn validate(&self) -> Result<(), ComposeError> {
        require_text(&self.name, "name")?;
        require_nonzero(self.attack, "attack")?;
        require_nonzero(self.health, "health")?;

        let mut seen = HashSet::with_capacity(self.rewards.len());
        for reward in &self.rewards {
            require_nonzero(reward.amount, "reward amount")?;
            if !seen.insert(&reward.resource) {
                return Err(ComposeError::DuplicateRewardType(reward.resource.clone()));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::fixtures::resource;

    #[test]
    fn unit_draft_requires_every_field() {
        let mut draft = UnitDraft {
            name: "Knight".into(),
            description: "Armored".into(),
            image_url: "https://img/knight.png".into(),
            attack: 5,
            health: 10,
        };
        assert_eq!(draft.validate(), Ok(()));

        draft.description = "   ".into();
        assert_eq!(draft.validate(), Err(ComposeError::MissingField("description")));

        draft.description = "Armored".into();
        draft.health = 0;
        assert_eq!(draft.validate(), Err(ComposeError::MissingField("health")));
    }

    #[test]
    fn contract_draft_needs_price() {
        let draft = ContractDraft {
            payment: Some(resource("0x1::gold::Gold")),
            unit_id: Some(UnitId(1)),
            fixed_price: 0,
        };
        assert_eq!(draft.validate(), Err(ComposeError::MissingField("fixed price")));
    }

    #[test]
    fn level_draft_rejects_repeated_reward() {
        let gold = resource("0x1::gold::Gold");
        let draft = LevelDraft {
            name: "Dragon".into(),
            attack: 50,
            health: 500,
            rewards: vec![
                Reward { resource: gold.clone(), amount: 10 },
                Reward { resource: gold.clone(), amount: 20 },
            ],
        };
        assert_eq!(draft.validate(), Err(ComposeError::DuplicateRewardType(gold)));
    }
}
