use crate::model::keywords::Visibility;
use crate::model::{ContainerId, MemberId};
use crate::transpiler::validation::errors::{Cp3Error, Result};
use serde::Serialize;

/// A base class in an inheritance list. Name and visibility go together.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Parent {
    name: String,
    visibility: Visibility,
}

impl Parent {
    pub fn new(name: &str, visibility: Visibility) -> Result<Self> {
        if name.is_empty() {
            return Err(Cp3Error::semantic(
                "parent name implies inheritance visibility and viceversa",
            ));
        }

        Ok(Self {
            name: name.to_string(),
            visibility,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn visibility(&self) -> Visibility {
        self.visibility
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct NamespaceData {
    pub(crate) constants: Vec<MemberId>,
    pub(crate) functions: Vec<MemberId>,
    pub(crate) class_count: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct ClassData {
    pub(crate) parents: Vec<Parent>,
    pub(crate) attributes: Vec<MemberId>,
    pub(crate) methods: Vec<MemberId>,
    /// Only meaningful for classes nested in another class.
    pub(crate) class_visibility: Visibility,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ContainerKind {
    Namespace(NamespaceData),
    Class(ClassData),
}

/// A namespace or class node in the module arena.
#[derive(Debug, Clone, Serialize)]
pub struct Container {
    pub(crate) name: String,
    pub(crate) parent: Option<ContainerId>,
    pub(crate) children: Vec<ContainerId>,
    pub(crate) current_visibility: Visibility,
    #[serde(flatten)]
    pub(crate) kind: ContainerKind,
}

impl Container {
    pub fn namespace(name: &str, parent: Option<ContainerId>) -> Self {
        Self {
            name: name.to_string(),
            parent,
            children: Vec::new(),
            current_visibility: Visibility::Public,
            kind: ContainerKind::Namespace(NamespaceData::default()),
        }
    }

    pub fn class(name: &str, parent: Option<ContainerId>, class_visibility: Visibility) -> Self {
        Self {
            name: name.to_string(),
            parent,
            children: Vec::new(),
            current_visibility: Visibility::Private,
            kind: ContainerKind::Class(ClassData {
                parents: Vec::new(),
                attributes: Vec::new(),
                methods: Vec::new(),
                class_visibility,
            }),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn parent(&self) -> Option<ContainerId> {
        self.parent
    }

    pub fn children(&self) -> &[ContainerId] {
        &self.children
    }

    pub fn current_visibility(&self) -> Visibility {
        self.current_visibility
    }

    pub fn set_current_visibility(&mut self, visibility: Visibility) -> Result<()> {
        if self.is_namespace() && visibility == Visibility::Protected {
            return Err(Cp3Error::semantic("protected visibility not allowed here"));
        }

        self.current_visibility = visibility;
        Ok(())
    }

    pub fn is_namespace(&self) -> bool {
        matches!(self.kind, ContainerKind::Namespace(_))
    }

    pub fn is_class(&self) -> bool {
        matches!(self.kind, ContainerKind::Class(_))
    }

    pub fn kind(&self) -> &ContainerKind {
        &self.kind
    }

    pub fn as_namespace(&self) -> Option<&NamespaceData> {
        match &self.kind {
            ContainerKind::Namespace(data) => Some(data),
            ContainerKind::Class(_) => None,
        }
    }

    pub fn as_class(&self) -> Option<&ClassData> {
        match &self.kind {
            ContainerKind::Class(data) => Some(data),
            ContainerKind::Namespace(_) => None,
        }
    }

    pub(crate) fn as_class_mut(&mut self) -> Option<&mut ClassData> {
        match &mut self.kind {
            ContainerKind::Class(data) => Some(data),
            ContainerKind::Namespace(_) => None,
        }
    }
}

impl NamespaceData {
    pub fn constants(&self) -> &[MemberId] {
        &self.constants
    }

    pub fn functions(&self) -> &[MemberId] {
        &self.functions
    }

    pub fn class_count(&self) -> usize {
        self.class_count
    }

    pub fn has_class(&self) -> bool {
        self.class_count > 0
    }

    pub fn has_functions(&self) -> bool {
        !self.functions.is_empty()
    }

    pub fn has_constants(&self) -> bool {
        !self.constants.is_empty()
    }

    pub fn is_empty(&self) -> bool {
        !self.has_constants() && !self.has_functions() && !self.has_class()
    }
}

impl ClassData {
    pub fn parents(&self) -> &[Parent] {
        &self.parents
    }

    pub fn set_parents(&mut self, parents: Vec<Parent>) {
        self.parents = parents;
    }

    pub fn attributes(&self) -> &[MemberId] {
        &self.attributes
    }

    pub fn methods(&self) -> &[MemberId] {
        &self.methods
    }

    pub fn class_visibility(&self) -> Visibility {
        self.class_visibility
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn namespaces_start_public_and_classes_private() {
        assert_eq!(Container::namespace("N", None).current_visibility(), Visibility::Public);
        assert_eq!(
            Container::class("A", None, Visibility::Public).current_visibility(),
            Visibility::Private
        );
    }

    #[test]
    fn namespaces_reject_protected_visibility() {
        let mut ns = Container::namespace("N", None);
        let err = ns.set_current_visibility(Visibility::Protected).unwrap_err();
        assert!(err.is_semantic());

        let mut class = Container::class("A", None, Visibility::Public);
        assert!(class.set_current_visibility(Visibility::Protected).is_ok());
    }

    #[test]
    fn parent_requires_a_name() {
        assert!(Parent::new("", Visibility::Public).is_err());
        let parent = Parent::new("Base", Visibility::Protected).unwrap();
        assert_eq!(parent.name(), "Base");
        assert_eq!(parent.visibility(), Visibility::Protected);
    }
}
