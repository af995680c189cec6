use qilan::*;

use crate::engine;

mod zoo {
    use qilan::mockable;

    #[mockable]
    pub trait Animal {
        fn eat(&self, food: &str);
        fn sleep(&self);
    }

    #[mockable(extends = [Animal])]
    pub trait Pet: Animal {
        fn cuddle(&self);
        fn eat(&self, food: &str);
    }
}

#[mockable(extends = [zoo::Pet], name = "GoodBoy")]
#[allow(dead_code)]
trait Dog: zoo::Pet {
    fn new(name: &str) -> Self
    where
        Self: Sized;
    fn constructor() -> Self
    where
        Self: Sized;
    fn bark(&self, times: u32) -> String;
}

#[mockable(prefix = ::qilan)]
#[allow(dead_code)]
trait Fish {
    fn swim(&mut self);
}

#[test]
fn members_are_collected_across_ancestry() {
    let dog = Mockable::from(&Dog);

    assert_eq!(dog.name(), "GoodBoy");
    assert_eq!(
        dog.members().collect::<Vec<_>>(),
        ["bark", "cuddle", "eat", "sleep"]
    );
    assert!(!dog.contains("new"));
    assert!(!dog.contains("constructor"));
}

#[test]
fn mockable_constant_describes_the_trait() {
    assert_eq!(Fish.name, "Fish");
    assert_eq!(Fish.methods, ["swim"]);
    assert!(Fish.parents.is_empty());

    assert_eq!(zoo::Pet.parents.len(), 1);
    assert_eq!(zoo::Pet.parents[0].name, "Animal");
}

#[test]
fn inherited_members_can_be_stubbed() -> Result<(), UsageError> {
    let qilan = engine();
    let dog = qilan.mock(&Dog)?;

    qilan.when(|| dog.call("sleep", args![]))?.returns("zzz")?;

    assert_eq!(dog.call("sleep", args![]), Value::from("zzz"));
    assert_eq!(dog.name(), "GoodBoy");
    Ok(())
}

#[test]
#[should_panic(expected = "GoodBoy has no member named `new`.")]
fn constructors_are_not_members() {
    let qilan = engine();
    let dog = qilan.mock(&Dog).unwrap();

    dog.call("new", args!["Rex"]);
}

#[test]
fn hand_built_mockable() -> Result<(), UsageError> {
    let qilan = engine();
    let animal = Mockable::new("Animal").method("eat");
    let horse = Mockable::new("Horse")
        .methods(["constructor", "gallop"])
        .extends(&animal);

    let proxy = qilan.mock(&horse)?;
    qilan.when(|| proxy.call("gallop", args![]))?.returns(true)?;

    assert_eq!(proxy.call("gallop", args![]), Value::Bool(true));
    assert_eq!(proxy.call("eat", args!["hay"]), Value::Undefined);
    Ok(())
}
