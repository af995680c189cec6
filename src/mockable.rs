use std::collections::BTreeSet;

/// Member names that are never mocked: they construct instances rather than
/// being called on one.
const CONSTRUCTORS: &[&str] = &["constructor", "new"];

/// The callable members of a type, collected across its ancestry.
///
/// ```rust
/// use qilan::Mockable;
///
/// let animal = Mockable::new("Animal").method("eat");
/// let dog = Mockable::new("Dog").method("bark").extends(&animal);
///
/// assert_eq!(dog.members().collect::<Vec<_>>(), ["bark", "eat"]);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Mockable {
    name: String,
    members: BTreeSet<String>,
}

impl Mockable {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            members: BTreeSet::new(),
        }
    }

    /// Add a member. Constructor names are ignored.
    pub fn method(mut self, name: impl Into<String>) -> Self {
        let name = name.into();
        if !CONSTRUCTORS.contains(&name.as_str()) {
            self.members.insert(name);
        }
        self
    }

    pub fn methods<I>(self, names: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        names
            .into_iter()
            .fold(self, |mockable, name| mockable.method(name))
    }

    /// Inherit every member of `parent`.
    pub fn extends(mut self, parent: &Mockable) -> Self {
        self.members.extend(parent.members.iter().cloned());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Member names in sorted order, without duplicates.
    pub fn members(&self) -> impl Iterator<Item = &str> {
        self.members.iter().map(String::as_str)
    }

    pub fn contains(&self, member: &str) -> bool {
        self.members.contains(member)
    }
}

impl From<&Mockable> for Mockable {
    fn from(mockable: &Mockable) -> Self {
        mockable.clone()
    }
}

/// Static description of a trait, generated by [mockable](crate::mockable).
#[derive(Debug)]
pub struct MockableTrait {
    pub name: &'static str,
    pub methods: &'static [&'static str],
    pub parents: &'static [&'static MockableTrait],
}

impl MockableTrait {
    /// Walk the ancestry chain into a [Mockable].
    pub fn to_mockable(&self) -> Mockable {
        self.parents.iter().fold(
            Mockable::new(self.name).methods(self.methods.iter().copied()),
            |mockable, parent| mockable.extends(&parent.to_mockable()),
        )
    }
}

impl From<&MockableTrait> for Mockable {
    fn from(mockable_trait: &MockableTrait) -> Self {
        mockable_trait.to_mockable()
    }
}
