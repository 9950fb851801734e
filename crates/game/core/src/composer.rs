//! Builds entry-function payloads from validated selections and drafts.
//!
//! Every method either returns a complete payload or a [`ComposeError`];
//! nothing partially populated ever leaves this module.
//!
//! # Price scaling
//!
//! Contract prices are integer multipliers and are sent unscaled. Purchase
//! and attack quantities are sent in base units (`× 10^8`). A purchase of
//! `q` units at price `p` therefore pays `q × 10^8 × p` base units.

use crate::affordability::validate_quantity;
use crate::catalog::{ContractId, LevelId, SelectedContract, SelectedLevel, UnitDefinition};
use crate::draft::{ContractDraft, LevelDraft, UnitDraft};
use crate::error::ComposeError;
use crate::payload::{EntryFunction, EntryFunctionPayload, MoveValue};
use crate::quantity::units_to_base;
use crate::resource::{ModuleId, ResourceType};
use crate::selection::AttackSelection;
use crate::variant::{RewardArity, UnitArity, select_attack, select_level_creation};

/// Struct name of every unit's backing resource; its module is `coin<index>`.
const UNIT_COIN_STRUCT: &str = "T";

#[derive(Clone, Debug)]
pub struct PayloadComposer {
    module: ModuleId,
}

impl PayloadComposer {
    pub fn new(module: ModuleId) -> Self {
        Self { module }
    }

    pub fn module(&self) -> &ModuleId {
        &self.module
    }

    fn payload(
        &self,
        function: EntryFunction,
        type_arguments: Vec<ResourceType>,
        arguments: Vec<MoveValue>,
    ) -> EntryFunctionPayload {
        EntryFunctionPayload {
            module: self.module.clone(),
            function,
            type_arguments,
            arguments,
        }
    }

    // ========================================================================
    // Player Actions
    // ========================================================================

    /// Starter resources for a fresh account.
    pub fn mint_coins(&self) -> EntryFunctionPayload {
        self.payload(EntryFunction::MintCoins, vec![], vec![])
    }

    /// `buy_units<payment, unit>(contract_id, units_to_base(quantity) × fixed_price, quantity)`
    ///
    /// `quantity` must lie in `[1, max_affordable]`.
    pub fn purchase(
        &self,
        contract: Option<&SelectedContract>,
        quantity: u64,
        max_affordable: u64,
    ) -> Result<EntryFunctionPayload, ComposeError> {
        let contract = contract.ok_or(ComposeError::NoContractSelected)?;
        let quantity = validate_quantity(quantity, max_affordable)?;

        let amount = units_to_base(quantity)?
            .checked_mul(contract.fixed_price)
            .ok_or(ComposeError::AmountOverflow)?;

        Ok(self.payload(
            EntryFunction::BuyUnits,
            vec![contract.payment.clone(), contract.unit_type.clone()],
            vec![
                contract.contract_id.0.into(),
                amount.into(),
                quantity.into(),
            ],
        ))
    }

    /// One of the four attack entry points, chosen by how many unit types are
    /// committed and how many rewards the level pays.
    ///
    /// Type arguments are the level's rewards followed by the committed
    /// units' resources. Value arguments are the level id, each unit's
    /// quantity in base units, then each unit id. Units appear in ascending
    /// id order in both lists.
    pub fn attack(
        &self,
        level: Option<&SelectedLevel>,
        selection: &AttackSelection,
    ) -> Result<EntryFunctionPayload, ComposeError> {
        let level = level.ok_or(ComposeError::NoLevelSelected)?;

        let committed: Vec<_> = selection.committed().collect();
        let units = UnitArity::from_count(committed.len())?;
        let rewards = RewardArity::from_count(level.reward_types.len())?;
        let variant = select_attack(units, rewards);

        let mut type_arguments = level.reward_types.clone();
        type_arguments.extend(committed.iter().map(|(_, c)| c.resource.clone()));

        let mut arguments = Vec::with_capacity(1 + committed.len() * 2);
        arguments.push(MoveValue::U64(level.level_id.0));
        for (_, commitment) in &committed {
            arguments.push(units_to_base(commitment.quantity)?.into());
        }
        arguments.extend(committed.iter().map(|(id, _)| MoveValue::U64(id.0)));

        Ok(self.payload(variant.entry_function(), type_arguments, arguments))
    }

    // ========================================================================
    // Admin Actions
    // ========================================================================

    /// Resource type minted for the unit created after `unit_count` others.
    pub fn unit_type_for(&self, unit_count: usize) -> ResourceType {
        ResourceType {
            address: self.module.address,
            module: format!("coin{}", unit_count + 1),
            name: UNIT_COIN_STRUCT.to_string(),
        }
    }

    /// Registers the backing resource for the next unit. Must finalize before
    /// [`create_unit`](Self::create_unit) with the same `unit_count`.
    pub fn create_unit_type(&self, unit_count: usize) -> EntryFunctionPayload {
        let index = unit_count as u64 + 1;
        self.payload(EntryFunction::CreateUnitType, vec![], vec![index.into()])
    }

    pub fn create_unit(
        &self,
        draft: &UnitDraft,
        unit_count: usize,
    ) -> Result<EntryFunctionPayload, ComposeError> {
        draft.validate()?;
        Ok(self.payload(
            EntryFunction::CreateUnit,
            vec![self.unit_type_for(unit_count)],
            vec![
                draft.name.as_str().into(),
                draft.description.as_str().into(),
                draft.image_url.as_str().into(),
                draft.attack.into(),
                draft.health.into(),
            ],
        ))
    }

    /// `create_unit_contract<payment, unit>(unit_id, fixed_price)`; the price
    /// is not scaled.
    pub fn create_contract(
        &self,
        draft: &ContractDraft,
        units: &[UnitDefinition],
    ) -> Result<EntryFunctionPayload, ComposeError> {
        let (payment, unit_id) = draft.validate()?;
        let unit = units
            .iter()
            .find(|u| u.id == unit_id)
            .ok_or(ComposeError::UnknownUnit(unit_id))?;

        Ok(self.payload(
            EntryFunction::CreateUnitContract,
            vec![payment.clone(), unit.linked_coin.clone()],
            vec![unit.id.0.into(), draft.fixed_price.into()],
        ))
    }

    pub fn create_level(&self, draft: &LevelDraft) -> Result<EntryFunctionPayload, ComposeError> {
        draft.validate()?;
        let variant = select_level_creation(draft.rewards.len())?;

        let type_arguments = draft.rewards.iter().map(|r| r.resource.clone()).collect();
        let mut arguments: Vec<MoveValue> = vec![
            draft.name.as_str().into(),
            draft.attack.into(),
            draft.health.into(),
        ];
        arguments.extend(draft.rewards.iter().map(|r| MoveValue::U64(r.amount)));

        Ok(self.payload(variant.entry_function(), type_arguments, arguments))
    }

    pub fn remove_contract(&self, id: ContractId) -> EntryFunctionPayload {
        self.payload(EntryFunction::RemoveUnitContract, vec![], vec![id.0.into()])
    }

    pub fn remove_level(&self, id: LevelId) -> EntryFunctionPayload {
        self.payload(EntryFunction::RemoveEnemyLevel, vec![], vec![id.0.into()])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::fixtures::{resource, unit};
    use crate::catalog::{PurchaseContract, Reward, UnitId};
    use crate::resource::AccountAddress;

    fn composer() -> PayloadComposer {
        let address: AccountAddress = "0xcafe".parse().unwrap();
        PayloadComposer::new(ModuleId::new(address, "pve_battles").unwrap())
    }

    fn level(id: u64, rewards: &[&str]) -> SelectedLevel {
        SelectedLevel {
            level_id: LevelId(id),
            name: "Goblin".into(),
            reward_types: rewards.iter().map(|r| resource(r)).collect(),
        }
    }

    fn contract(price: u64) -> SelectedContract {
        let units = vec![unit(7, 5, 10)];
        let contract = PurchaseContract {
            id: ContractId(3),
            unit_id: UnitId(7),
            unit_type: units[0].linked_coin.clone(),
            payment: resource("0x1::gold::Gold"),
            fixed_price: price,
        };
        SelectedContract::resolve(&contract, &units).unwrap()
    }

    #[test]
    fn attack_one_unit_one_reward() {
        let mut selection = AttackSelection::new();
        selection.set(UnitId(7), 3, resource("0x1::a::A"));

        let payload = composer()
            .attack(Some(&level(11, &["0x1::x::X"])), &selection)
            .unwrap();

        assert_eq!(payload.function, EntryFunction::AttackEnemyWithOneUnitOneReward);
        assert_eq!(
            payload.type_arguments,
            vec![resource("0x1::x::X"), resource("0x1::a::A")]
        );
        assert_eq!(payload.u64_arguments(), vec![11, 300_000_000, 7]);
    }

    #[test]
    fn attack_two_units_two_rewards() {
        let mut selection = AttackSelection::new();
        selection.set(UnitId(9), 1, resource("0x1::b::B"));
        selection.set(UnitId(7), 2, resource("0x1::a::A"));

        let payload = composer()
            .attack(Some(&level(11, &["0x1::x::X", "0x1::y::Y"])), &selection)
            .unwrap();

        assert_eq!(payload.function, EntryFunction::AttackEnemyWithTwoUnitsTwoReward);
        assert_eq!(
            payload.type_arguments,
            vec![
                resource("0x1::x::X"),
                resource("0x1::y::Y"),
                resource("0x1::a::A"),
                resource("0x1::b::B"),
            ]
        );
        assert_eq!(
            payload.u64_arguments(),
            vec![11, 200_000_000, 100_000_000, 7, 9]
        );
    }

    #[test]
    fn attack_mixed_arities() {
        let mut one = AttackSelection::new();
        one.set(UnitId(4), 5, resource("0x1::a::A"));
        let payload = composer()
            .attack(Some(&level(2, &["0x1::x::X", "0x1::y::Y"])), &one)
            .unwrap();
        assert_eq!(payload.function, EntryFunction::AttackEnemyWithOneUnitTwoReward);
        assert_eq!(payload.type_arguments.len(), 3);
        assert_eq!(payload.u64_arguments(), vec![2, 500_000_000, 4]);

        let mut two = AttackSelection::new();
        two.set(UnitId(4), 1, resource("0x1::a::A"));
        two.set(UnitId(5), 1, resource("0x1::b::B"));
        let payload = composer()
            .attack(Some(&level(2, &["0x1::x::X"])), &two)
            .unwrap();
        assert_eq!(payload.function, EntryFunction::AttackEnemyWithTwoUnitsOneReward);
        assert_eq!(payload.type_arguments[0], resource("0x1::x::X"));
        assert_eq!(payload.u64_arguments(), vec![2, 100_000_000, 100_000_000, 4, 5]);
    }

    #[test]
    fn attack_preconditions() {
        let mut selection = AttackSelection::new();
        selection.set(UnitId(1), 0, resource("0x1::a::A"));

        assert_eq!(
            composer().attack(None, &selection),
            Err(ComposeError::NoLevelSelected)
        );
        assert_eq!(
            composer().attack(Some(&level(1, &["0x1::x::X"])), &selection),
            Err(ComposeError::NoUnitsCommitted)
        );

        selection.set(UnitId(1), 1, resource("0x1::a::A"));
        selection.set(UnitId(2), 1, resource("0x1::b::B"));
        selection.set(UnitId(3), 1, resource("0x1::c::C"));
        assert_eq!(
            composer().attack(Some(&level(1, &["0x1::x::X"])), &selection),
            Err(ComposeError::TooManyUnitTypes { count: 3 })
        );
    }

    #[test]
    fn purchase_scales_quantity_but_not_price() {
        let payload = composer().purchase(Some(&contract(4)), 6, 10).unwrap();

        assert_eq!(payload.function, EntryFunction::BuyUnits);
        assert_eq!(
            payload.type_arguments,
            vec![resource("0x1::gold::Gold"), resource("0xcafe::coin7::T")]
        );
        assert_eq!(payload.u64_arguments(), vec![3, 2_400_000_000, 6]);
    }

    #[test]
    fn purchase_preconditions() {
        assert_eq!(
            composer().purchase(None, 1, 5),
            Err(ComposeError::NoContractSelected)
        );
        assert_eq!(
            composer().purchase(Some(&contract(4)), 0, 5),
            Err(ComposeError::QuantityOutOfRange { requested: 0, max: 5 })
        );
        assert_eq!(
            composer().purchase(Some(&contract(4)), 6, 5),
            Err(ComposeError::QuantityOutOfRange { requested: 6, max: 5 })
        );
        assert_eq!(
            composer().purchase(Some(&contract(u64::MAX)), 1, 5),
            Err(ComposeError::AmountOverflow)
        );
    }

    #[test]
    fn unit_creation_derives_next_coin_module() {
        let composer = composer();
        let draft = UnitDraft {
            name: "Archer".into(),
            description: "Ranged".into(),
            image_url: "https://img/archer.png".into(),
            attack: 4,
            health: 6,
        };

        let init = composer.create_unit_type(2);
        assert_eq!(init.function, EntryFunction::CreateUnitType);
        assert!(init.type_arguments.is_empty());
        assert_eq!(init.arguments, vec![MoveValue::U64(3)]);

        let payload = composer.create_unit(&draft, 2).unwrap();
        assert_eq!(payload.type_arguments, vec![resource("0xcafe::coin3::T")]);
        assert_eq!(
            payload.arguments,
            vec![
                MoveValue::String("Archer".into()),
                MoveValue::String("Ranged".into()),
                MoveValue::String("https://img/archer.png".into()),
                MoveValue::U64(4),
                MoveValue::U64(6),
            ]
        );
    }

    #[test]
    fn contract_creation_passes_price_unscaled() {
        let units = vec![unit(7, 5, 10)];
        let draft = ContractDraft {
            payment: Some(resource("0x1::gold::Gold")),
            unit_id: Some(UnitId(7)),
            fixed_price: 4,
        };

        let payload = composer().create_contract(&draft, &units).unwrap();
        assert_eq!(payload.function, EntryFunction::CreateUnitContract);
        assert_eq!(
            payload.type_arguments,
            vec![resource("0x1::gold::Gold"), units[0].linked_coin.clone()]
        );
        assert_eq!(payload.u64_arguments(), vec![7, 4]);

        let orphan = ContractDraft {
            unit_id: Some(UnitId(8)),
            ..draft
        };
        assert_eq!(
            composer().create_contract(&orphan, &units),
            Err(ComposeError::UnknownUnit(UnitId(8)))
        );
    }

    #[test]
    fn level_creation_variants() {
        let mut draft = LevelDraft {
            name: "Troll".into(),
            attack: 7,
            health: 70,
            rewards: vec![Reward {
                resource: resource("0x1::x::X"),
                amount: 15,
            }],
        };

        let single = composer().create_level(&draft).unwrap();
        assert_eq!(single.function, EntryFunction::CreateEnemyLevel);
        assert_eq!(single.type_arguments, vec![resource("0x1::x::X")]);
        assert_eq!(single.arguments[0], MoveValue::String("Troll".into()));
        assert_eq!(single.u64_arguments(), vec![7, 70, 15]);

        draft.rewards.push(Reward {
            resource: resource("0x1::y::Y"),
            amount: 25,
        });
        let double = composer().create_level(&draft).unwrap();
        assert_eq!(
            double.function,
            EntryFunction::CreateEnemyLevelWithTwoRewardCoins
        );
        assert_eq!(
            double.type_arguments,
            vec![resource("0x1::x::X"), resource("0x1::y::Y")]
        );
        assert_eq!(double.u64_arguments(), vec![7, 70, 15, 25]);

        draft.rewards.clear();
        assert_eq!(
            composer().create_level(&draft),
            Err(ComposeError::MissingField("reward resource"))
        );
    }

    #[test]
    fn removals_take_only_the_id() {
        let c = composer().remove_contract(ContractId(4));
        assert_eq!(c.function, EntryFunction::RemoveUnitContract);
        assert_eq!(c.arguments, vec![MoveValue::U64(4)]);

        let l = composer().remove_level(LevelId(9));
        assert_eq!(l.function, EntryFunction::RemoveEnemyLevel);
        assert!(l.type_arguments.is_empty());
        assert_eq!(l.arguments, vec![MoveValue::U64(9)]);
    }

    #[test]
    fn mint_has_no_arguments() {
        let payload = composer().mint_coins();
        assert_eq!(payload.function, EntryFunction::MintCoins);
        assert!(payload.arguments.is_empty() && payload.type_arguments.is_empty());
    }
}
