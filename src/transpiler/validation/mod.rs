use crate::model::keywords::{Storage, Visibility};
use crate::model::{
    CheckContext, Container, ContainerId, ContainerKind, EntryPoint, Entity, Member, MemberKind,
    Module, Strictness,
};
use errors::{Cp3Error, Result};

pub mod errors;
mod tests;

/// Runs the whole-module check: basic rules for every container, then the
/// leveled rules selected by `strictness`.
pub fn check_module(module: &Module, strictness: Strictness) -> Result<()> {
    module.check(&CheckContext::new(module, strictness))
}

/// Checks a single member as soon as it has been attached to its container.
pub fn check_member(module: &Module, member: &Member, strictness: Strictness) -> Result<()> {
    member.check(&CheckContext::new(module, strictness))
}

pub fn check_entry_point(
    module: &Module,
    entry_point: &EntryPoint,
    strictness: Strictness,
) -> Result<()> {
    entry_point.check(&CheckContext::new(module, strictness))
}

impl Entity for Module {
    fn name(&self) -> &str {
        Module::name(self)
    }

    fn check_basic(&self, ctx: &CheckContext<'_>) -> Result<()> {
        if self.roots().is_empty() && self.entry_point().is_none() {
            return Err(Cp3Error::strictness("empty module?"));
        }

        for root in self.roots() {
            self.container(*root).check(ctx)?;
        }

        Ok(())
    }

    fn check_high(&self, ctx: &CheckContext<'_>) -> Result<()> {
        for root in self.roots() {
            check_namespace_chain(ctx, *root)?;
        }
        Ok(())
    }
}

/// Walks a root namespace chain: only the innermost level may hold content.
fn check_namespace_chain(ctx: &CheckContext<'_>, root: ContainerId) -> Result<()> {
    let module = ctx.module;
    let mut cursor = Some(root);

    while let Some(id) = cursor {
        let container = module.container(id);
        let Some(namespace) = container.as_namespace() else {
            break;
        };

        let holds_namespace = container
            .children()
            .iter()
            .any(|child| module.container(*child).is_namespace());

        if holds_namespace && !namespace.is_empty() {
            return Err(Cp3Error::strictness(format!(
                "outer namespaces must be empty: {}",
                container.name()
            )));
        }

        cursor = match container.children() {
            [] => None,
            [only] => Some(*only),
            _ => {
                return Err(Cp3Error::strictness(
                    "only one inner namespace allowed per namespace",
                ));
            }
        };
    }

    Ok(())
}

fn sub_namespace_count(module: &Module, container: &Container) -> usize {
    container
        .children()
        .iter()
        .filter(|child| module.container(**child).is_namespace())
        .count()
}

impl Entity for Container {
    fn name(&self) -> &str {
        Container::name(self)
    }

    /// Nested containers are checked along with their parent.
    fn check_basic(&self, ctx: &CheckContext<'_>) -> Result<()> {
        for child in self.children() {
            ctx.module.container(*child).check(ctx)?;
        }
        Ok(())
    }

    fn check_medium(&self, ctx: &CheckContext<'_>) -> Result<()> {
        let ContainerKind::Namespace(namespace) = self.kind() else {
            return Ok(());
        };

        if namespace.has_functions() && namespace.has_class() {
            return Err(Cp3Error::strictness(
                "functions and classes cannot share the same namespace",
            ));
        }

        if sub_namespace_count(ctx.module, self) > 1 {
            return Err(Cp3Error::strictness("only one namespace allowed per namespace"));
        }

        Ok(())
    }

    fn check_high(&self, _ctx: &CheckContext<'_>) -> Result<()> {
        let ContainerKind::Namespace(namespace) = self.kind() else {
            return Ok(());
        };
        let containers = self.children().len();

        if namespace.has_functions() && namespace.has_class() {
            return Err(Cp3Error::strictness(
                "functions and classes cannot share the same namespace",
            ));
        }

        if namespace.class_count() > 1 {
            return Err(Cp3Error::strictness(
                "no more than one class allowed per namespace",
            ));
        }

        if namespace.has_class() && containers > namespace.class_count() {
            return Err(Cp3Error::strictness(
                "one namespace can only hold another namespace or a class",
            ));
        }

        if containers > 1 {
            return Err(Cp3Error::strictness("only one namespace allowed per namespace"));
        }

        Ok(())
    }
}

fn check_class_member(ctx: &CheckContext<'_>, member: &Member) -> Result<()> {
    if ctx.module.owning_class(member).is_none() {
        return Err(Cp3Error::semantic(format!(
            "class member {} does not pertain to a class",
            member.name()
        )));
    }
    Ok(())
}

fn check_namespace_member(ctx: &CheckContext<'_>, member: &Member) -> Result<()> {
    let in_namespace = member
        .container()
        .is_some_and(|id| ctx.module.container(id).is_namespace());

    if !in_namespace {
        return Err(Cp3Error::semantic(format!(
            "namespace member '{}' does not pertain to a namespace",
            member.name()
        )));
    }

    if member.visibility() == Visibility::Protected {
        return Err(Cp3Error::semantic(
            "member of namespace cannot have protected access",
        ));
    }

    if (member.visibility() == Visibility::Private || member.is_static()) && member.is_inline() {
        return Err(Cp3Error::semantic(format!(
            "namespace member {} cannot have both inline storage and private visibility (static)",
            member.name()
        )));
    }

    Ok(())
}

impl Entity for Member {
    fn name(&self) -> &str {
        Member::name(self)
    }

    fn check_basic(&self, ctx: &CheckContext<'_>) -> Result<()> {
        match self.kind() {
            MemberKind::Attribute(_) => {
                check_class_member(ctx, self)?;

                if !self.is_static() && !self.initial_value().is_empty() {
                    return Err(Cp3Error::semantic(
                        "attribute must be static in order to have an inital value",
                    ));
                }
            }
            MemberKind::Method(_) => {
                check_class_member(ctx, self)?;
                let structor =
                    ctx.module.is_constructor(self) || ctx.module.is_destructor(self);

                if self.is_pure_virtual() && !self.body().is_empty() {
                    return Err(Cp3Error::semantic(
                        "a pure virtual function cannot have instructions",
                    ));
                }

                if self.is_pure_virtual() && structor {
                    return Err(Cp3Error::semantic(
                        "constructors/destructors cannot be pure virtual",
                    ));
                }

                if self.is_virtual() && ctx.module.is_constructor(self) {
                    return Err(Cp3Error::semantic("constructors cannot be virtual"));
                }

                if self.is_inline() && self.is_pure_virtual() {
                    return Err(Cp3Error::semantic("inline functions cannot be pure virtual"));
                }
            }
            MemberKind::Constant(_) => {
                check_namespace_member(ctx, self)?;

                if self.initial_value().is_empty() {
                    return Err(Cp3Error::semantic(format!(
                        "{} constant should have an initial value",
                        self.name()
                    )));
                }
            }
            MemberKind::Function(_) => {
                check_namespace_member(ctx, self)?;

                if let Some(storage) = self.storage() {
                    if !matches!(storage, Storage::Static | Storage::Inline) {
                        return Err(Cp3Error::semantic(format!(
                            "namespace function {} should be static or inline, not {}",
                            self.name(),
                            storage
                        )));
                    }
                }
            }
        }

        Ok(())
    }
}

impl Entity for EntryPoint {
    fn name(&self) -> &str {
        self.function().name()
    }

    fn check_basic(&self, _ctx: &CheckContext<'_>) -> Result<()> {
        match self.function().storage() {
            None => Ok(()),
            Some(Storage::Static | Storage::Inline) => Err(Cp3Error::semantic(
                "main function should not be either static or inline",
            )),
            Some(_) => Err(Cp3Error::semantic(
                "main function should not have any storage modifier",
            )),
        }
    }
}
