pub mod container;
pub mod entity;
pub mod keywords;
pub mod member;

pub use container::{ClassData, Container, ContainerKind, NamespaceData, Parent};
pub use entity::{CheckContext, Entity, Strictness};
pub use keywords::{Modifier, NativeType, Storage, TypeRef, Visibility};
pub use member::{EntryPoint, Member, MemberKind};

use crate::transpiler::codegen::StandardHeaders;
use crate::transpiler::validation::errors::{Cp3Error, Result};
use serde::Serialize;
use tracing::debug;

/// Index of a namespace or class in the module arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct ContainerId(pub(crate) usize);

/// Index of a member in the module arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct MemberId(pub(crate) usize);

/// Where the parser stands, derived from the innermost open container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ParseState {
    TopLevel,
    NamespaceLevel,
    ClassLevel,
}

/// The translation unit: owns every container and member of one source file.
///
/// Containers and members live in flat arenas; parent links are plain
/// indices, so qualified names are built by walking `Container::parent`.
#[derive(Debug, Serialize)]
pub struct Module {
    name: String,
    containers: Vec<Container>,
    members: Vec<Member>,
    roots: Vec<ContainerId>,
    entry_point: Option<EntryPoint>,
    dependencies: Vec<String>,
    #[serde(skip)]
    open: Vec<ContainerId>,
    #[serde(skip)]
    standard_headers: StandardHeaders,
}

impl Module {
    /// Creates an empty module. Dots and colons in the name become `_`.
    pub fn new(name: &str) -> Self {
        Self {
            name: name.replace(['.', ':'], "_"),
            containers: Vec::new(),
            members: Vec::new(),
            roots: Vec::new(),
            entry_point: None,
            dependencies: Vec::new(),
            open: Vec::new(),
            standard_headers: StandardHeaders::default(),
        }
    }

    pub fn set_standard_headers(&mut self, headers: StandardHeaders) {
        self.standard_headers = headers;
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn state(&self) -> ParseState {
        match self.current() {
            None => ParseState::TopLevel,
            Some(id) if self.container(id).is_namespace() => ParseState::NamespaceLevel,
            Some(_) => ParseState::ClassLevel,
        }
    }

    /// Innermost open container, if any.
    pub fn current(&self) -> Option<ContainerId> {
        self.open.last().copied()
    }

    /// Innermost open namespace, skipping any classes opened inside it.
    pub fn current_namespace(&self) -> Option<ContainerId> {
        self.open
            .iter()
            .rev()
            .copied()
            .find(|id| self.container(*id).is_namespace())
    }

    pub fn container(&self, id: ContainerId) -> &Container {
        &self.containers[id.0]
    }

    pub fn container_mut(&mut self, id: ContainerId) -> &mut Container {
        &mut self.containers[id.0]
    }

    pub fn containers(&self) -> &[Container] {
        &self.containers
    }

    pub fn member(&self, id: MemberId) -> &Member {
        &self.members[id.0]
    }

    pub fn members(&self) -> &[Member] {
        &self.members
    }

    /// Top-level namespaces, in the order they were opened.
    pub fn roots(&self) -> &[ContainerId] {
        &self.roots
    }

    fn push_container(&mut self, container: Container) -> ContainerId {
        let id = ContainerId(self.containers.len());
        let parent = container.parent;
        self.containers.push(container);

        match parent {
            Some(parent) => self.containers[parent.0].children.push(id),
            None => self.roots.push(id),
        }

        self.open.push(id);
        id
    }

    /// Opens a namespace inside the current one (or at top level).
    pub fn open_namespace(&mut self, name: &str) -> Result<ContainerId> {
        if self.state() == ParseState::ClassLevel {
            return Err(Cp3Error::semantic(format!(
                "namespace {name} cannot be nested in a class"
            )));
        }

        let parent = self.current();
        let mut namespace = Container::namespace(name, parent);
        if let Some(parent) = parent {
            namespace.current_visibility = self.container(parent).current_visibility();
        }

        let id = self.push_container(namespace);
        debug!(namespace = name, "opened namespace");
        Ok(id)
    }

    /// Opens a class inside the current namespace or class.
    pub fn open_class(&mut self, name: &str, parents: Vec<Parent>) -> Result<ContainerId> {
        let Some(outer) = self.current() else {
            return Err(Cp3Error::semantic(format!(
                "class {name} must be declared inside a namespace"
            )));
        };

        let class_visibility = self.container(outer).current_visibility();
        let mut class = Container::class(name, Some(outer), class_visibility);
        if let Some(data) = class.as_class_mut() {
            data.set_parents(parents);
        }

        if let ContainerKind::Namespace(data) = &mut self.container_mut(outer).kind {
            data.class_count += 1;
        }

        let id = self.push_container(class);
        debug!(class = name, "opened class");
        Ok(id)
    }

    /// Closes the innermost container and returns it.
    pub fn close(&mut self) -> Option<ContainerId> {
        let closed = self.open.pop();
        if let Some(id) = closed {
            debug!(container = self.container(id).name(), "closed container");
        }
        closed
    }

    /// Attaches a member to `container` and files it in the matching list.
    ///
    /// Misplaced members are still stored; their checks report the problem.
    pub fn add_member(&mut self, container: ContainerId, mut member: Member) -> MemberId {
        let id = MemberId(self.members.len());
        member.container = Some(container);

        match (&member.kind, &mut self.containers[container.0].kind) {
            (MemberKind::Attribute(_), ContainerKind::Class(class)) => class.attributes.push(id),
            (MemberKind::Method(_), ContainerKind::Class(class)) => class.methods.push(id),
            (MemberKind::Constant(_), ContainerKind::Namespace(ns)) => ns.constants.push(id),
            (MemberKind::Function(_), ContainerKind::Namespace(ns)) => ns.functions.push(id),
            _ => {}
        }

        self.members.push(member);
        id
    }

    pub fn entry_point(&self) -> Option<&EntryPoint> {
        self.entry_point.as_ref()
    }

    pub fn set_entry_point(&mut self, entry_point: EntryPoint) -> Result<()> {
        if self.entry_point.is_some() {
            return Err(Cp3Error::semantic("main function defined twice"));
        }

        self.entry_point = Some(entry_point);
        Ok(())
    }

    /// Records a dependency unless it names a standard library header.
    /// Duplicates are kept.
    pub fn add_dependency(&mut self, file_name: &str) {
        if self.standard_headers.contains(file_name) {
            debug!(dependency = file_name, "standard header filtered out");
            return;
        }

        debug!(dependency = file_name, "dependency recorded");
        self.dependencies.push(file_name.to_string());
    }

    pub fn dependencies(&self) -> &[String] {
        &self.dependencies
    }

    /// Container names from the outermost one down to `id`.
    pub fn container_path(&self, id: ContainerId) -> Vec<&str> {
        let mut path = Vec::new();
        let mut cursor = Some(id);

        while let Some(current) = cursor {
            let container = self.container(current);
            path.push(container.name());
            cursor = container.parent();
        }

        path.reverse();
        path
    }

    /// `::`-joined container chain followed by the member name.
    pub fn qualified_name(&self, member: &Member) -> String {
        let mut parts = member
            .container()
            .map(|id| self.container_path(id))
            .unwrap_or_default();
        parts.push(member.name());
        parts.join(keywords::ACCESS_OPERATOR)
    }

    /// The class a member belongs to, if it belongs to one.
    pub fn owning_class(&self, member: &Member) -> Option<&Container> {
        member
            .container()
            .map(|id| self.container(id))
            .filter(|container| container.is_class())
    }

    pub fn is_constructor(&self, member: &Member) -> bool {
        self.owning_class(member)
            .is_some_and(|class| member.is_constructor_of(class.name()))
    }

    pub fn is_destructor(&self, member: &Member) -> bool {
        self.owning_class(member)
            .is_some_and(|class| member.is_destructor_of(class.name()))
    }

    /// True while any namespace or class is still open.
    pub fn has_open_blocks(&self) -> bool {
        !self.open.is_empty()
    }
}
