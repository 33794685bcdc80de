//! Integration tests for stocking and selling from a machine

use rusty_money::{Money, iso::GBP};
use testresult::TestResult;

use vending::{
    assortment::Assortment,
    coins::{CoinError, CoinPurse, Denomination},
    machine::{LoadError, Machine, MachineConfig, Outcome, RefundReason},
    products::Product,
    slots::{SlotCode, SlotError},
};

fn machine(slot_count: usize, slot_depth: u32) -> TestResult<Machine> {
    Ok(Machine::new(MachineConfig {
        slot_count,
        slot_depth,
        currency: GBP,
    })?)
}

fn coins(coins: &[(u64, u32)]) -> Result<CoinPurse, CoinError> {
    coins
        .iter()
        .map(|&(value, count)| Ok((Denomination::new(value)?, count)))
        .collect::<Result<Vec<_>, CoinError>>()
        .and_then(CoinPurse::with_coins)
}

#[test]
fn soda_sale_pays_fifty_pence_change() -> TestResult {
    let mut machine = machine(2, 3)?;

    machine.load_products(&Assortment::with_products([Product::new("Soda", 5, 150)])?)?;
    machine.load_coins(&coins(&[(50, 4), (100, 1)])?)?;

    let slots: Vec<_> = machine.slots().codes_for("Soda").collect();
    assert_eq!(slots, [SlotCode(0), SlotCode(1)]);

    let menu = machine.available_products();
    let soda = menu.get("Soda").ok_or("Soda missing from menu")?;
    assert_eq!(soda.slot, SlotCode(0));
    assert_eq!(*soda.price, 150);

    let outcome = machine.choose_product(soda.slot, coins(&[(100, 2)])?);

    assert_eq!(outcome.product(), Some(&Product::new("Soda", 1, 150)));
    assert_eq!(outcome.returned_coins(), &coins(&[(50, 1)])?);
    assert_eq!(machine.assortment().get("Soda").map(|p| p.quantity), Some(4));

    // 4 x 0.50 + 1 x 1.00 held, 2 x 1.00 paid in, 1 x 0.50 paid out.
    assert_eq!(machine.reserve(), &coins(&[(50, 3), (100, 3)])?);
    assert_eq!(machine.balance()?, Money::from_minor(450, GBP));

    Ok(())
}

#[test]
fn overloaded_delivery_is_rejected() -> TestResult {
    let mut machine = machine(2, 3)?;

    let result = machine.load_products(&Assortment::with_products([Product::new("Soda", 7, 150)])?);

    assert_eq!(
        result,
        Err(LoadError::MachineOverloaded(SlotError::MachineOverloaded {
            required: 3,
            available: 2,
        }))
    );
    assert!(machine.assortment().is_empty());
    assert_eq!(machine.slots().occupied().count(), 0);

    Ok(())
}

#[test]
fn overloaded_delivery_keeps_previous_stock() -> TestResult {
    let mut machine = machine(12, 10)?;

    machine.load_products(&Assortment::with_products([
        Product::new("Chocolate bar", 10, 120),
        Product::new("Strawberry bar", 5, 110),
        Product::new("Orange juice", 20, 200),
        Product::new("Apple juice", 15, 210),
    ])?)?;

    let assortment = machine.assortment().clone();
    let slots = machine.slots().clone();

    let result = machine.load_products(&Assortment::with_products([
        Product::new("Strawberry bar", 25, 110),
        Product::new("Orange juice", 20, 200),
        Product::new("Apple juice", 45, 210),
    ])?);

    assert!(matches!(result, Err(LoadError::MachineOverloaded(_))));
    assert_eq!(machine.assortment(), &assortment);
    assert_eq!(machine.slots(), &slots);

    Ok(())
}

#[test]
fn second_delivery_rearranges_from_scratch() -> TestResult {
    let mut machine = machine(12, 10)?;

    machine.load_products(&Assortment::with_products([
        Product::new("Chocolate bar", 10, 120),
        Product::new("Orange juice", 20, 200),
    ])?)?;

    assert_eq!(
        machine.available_products().get("Orange juice").map(|e| e.slot),
        Some(SlotCode(1))
    );

    machine.load_products(&Assortment::with_products([
        Product::new("Apple juice", 25, 210),
        Product::new("Orange juice", 20, 200),
    ])?)?;

    let menu = machine.available_products();

    assert_eq!(menu.get("Apple juice").map(|e| e.slot), Some(SlotCode(0)));
    assert_eq!(menu.get("Chocolate bar").map(|e| e.slot), Some(SlotCode(3)));
    assert_eq!(menu.get("Orange juice").map(|e| e.slot), Some(SlotCode(4)));
    assert_eq!(machine.slots().units(), 75);
    assert_eq!(machine.slots().occupied().count(), 8);

    Ok(())
}

#[test]
fn empty_delivery_restocks_layout_without_changing_stock() -> TestResult {
    let mut machine = machine(2, 3)?;
    machine.load_products(&Assortment::with_products([Product::new("Soda", 5, 150)])?)?;

    for _ in 0..3 {
        let outcome = machine.choose_product(SlotCode(0), coins(&[(50, 3)])?);
        assert!(outcome.is_dispensed(), "expected sale, got {outcome:?}");
    }

    assert_eq!(machine.slot(SlotCode(0)).map(|slot| slot.quantity), Some(0));

    let assortment = machine.assortment().clone();
    let units = machine.slots().units();

    machine.load_products(&Assortment::new())?;

    assert_eq!(machine.assortment(), &assortment);
    assert_eq!(machine.slots().units(), units);

    // The remaining two units are laid out again from the first slot.
    assert_eq!(machine.slot(SlotCode(0)).map(|slot| slot.quantity), Some(2));
    assert_eq!(machine.slot(SlotCode(1)), None);
    assert_eq!(
        machine.available_products().get("Soda").map(|e| e.slot),
        Some(SlotCode(0))
    );

    Ok(())
}

#[test]
fn insufficient_funds_never_change_balance() -> TestResult {
    let mut machine = machine(2, 3)?;
    machine.load_products(&Assortment::with_products([Product::new("Soda", 5, 150)])?)?;
    machine.load_coins(&coins(&[(50, 4)])?)?;

    let before = machine.balance()?;

    for inserted in [coins(&[(100, 1)])?, coins(&[(50, 2)])?, CoinPurse::new()] {
        let outcome = machine.choose_product(SlotCode(0), inserted.clone());

        assert_eq!(
            outcome,
            Outcome::Refunded {
                coins: inserted,
                reason: RefundReason::InsufficientFunds,
            }
        );
        assert_eq!(machine.balance()?, before);
    }

    Ok(())
}

#[test]
fn unmakeable_change_refunds_and_preserves_state() -> TestResult {
    let mut machine = machine(1, 10)?;
    machine.load_products(&Assortment::with_products([Product::new("Gum", 4, 30)])?)?;
    machine.load_coins(&coins(&[(50, 2)])?)?;

    let reserve = machine.reserve().clone();
    let assortment = machine.assortment().clone();
    let slots = machine.slots().clone();

    // 0.30 owes 0.20 change from a 0.50, and the reserve only holds 0.50s.
    let outcome = machine.choose_product(SlotCode(0), coins(&[(50, 1)])?);

    assert_eq!(
        outcome,
        Outcome::Refunded {
            coins: coins(&[(50, 1)])?,
            reason: RefundReason::ExactChangeUnavailable,
        }
    );
    assert_eq!(machine.reserve(), &reserve);
    assert_eq!(machine.assortment(), &assortment);
    assert_eq!(machine.slots(), &slots);

    Ok(())
}

#[test]
fn selling_out_removes_product_from_menu() -> TestResult {
    let mut machine = machine(2, 3)?;
    machine.load_products(&Assortment::with_products([
        Product::new("Soda", 2, 150),
        Product::new("Water", 1, 90),
    ])?)?;

    for _ in 0..2 {
        let outcome = machine.choose_product(SlotCode(0), coins(&[(50, 3)])?);
        assert!(outcome.is_dispensed(), "expected sale, got {outcome:?}");
    }

    let menu = machine.available_products();

    assert_eq!(menu.get("Soda"), None);
    assert_eq!(menu.get("Water").map(|e| e.slot), Some(SlotCode(1)));
    assert_eq!(machine.balance()?, Money::from_minor(300, GBP));

    Ok(())
}

#[test]
fn cash_out_returns_everything_taken() -> TestResult {
    let mut machine = machine(1, 5)?;
    machine.load_products(&Assortment::with_products([Product::new("Soda", 5, 150)])?)?;
    machine.load_coins(&coins(&[(10, 5)])?)?;

    let outcome = machine.choose_product(SlotCode(0), coins(&[(100, 2)])?);
    assert!(outcome.is_dispensed(), "expected sale, got {outcome:?}");

    let cash = machine.cash_out();

    assert_eq!(cash.total_value()?, 50 + 150);
    assert!(machine.reserve().is_empty());
    assert_eq!(machine.balance()?, Money::from_minor(0, GBP));

    // An empty reserve can still sell for exact money.
    let outcome = machine.choose_product(SlotCode(0), coins(&[(100, 1), (50, 1)])?);
    assert!(outcome.is_dispensed(), "expected sale, got {outcome:?}");

    Ok(())
}

#[test]
fn menu_is_a_snapshot() -> TestResult {
    let mut machine = machine(2, 3)?;
    machine.load_products(&Assortment::with_products([Product::new("Soda", 5, 150)])?)?;

    let menu = machine.available_products();
    let outcome = machine.choose_product(SlotCode(0), coins(&[(50, 3)])?);
    assert!(outcome.is_dispensed(), "expected sale, got {outcome:?}");

    assert_eq!(menu.get("Soda").map(|e| e.quantity), Some(5));
    assert_eq!(
        machine.available_products().get("Soda").map(|e| e.quantity),
        Some(4)
    );

    Ok(())
}
