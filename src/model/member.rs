use crate::model::keywords::{MAIN_FUNCTION, Modifier, NativeType, Storage, TypeRef, Visibility};
use crate::model::ContainerId;
use crate::transpiler::validation::errors::{Cp3Error, Result};
use serde::Serialize;

/// Initial value of an attribute or constant, raw text as written.
#[derive(Debug, Clone, Default, Serialize)]
pub struct DataInfo {
    pub(crate) initial_value: String,
}

/// Parameter list and body of a callable, both kept verbatim.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CodeInfo {
    pub(crate) parameters: String,
    pub(crate) body: String,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct MethodInfo {
    #[serde(flatten)]
    pub(crate) code: CodeInfo,
    pub(crate) quick_init_list: String,
    pub(crate) const_method: bool,
    pub(crate) pure_virtual: bool,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum MemberKind {
    Attribute(DataInfo),
    Constant(DataInfo),
    Method(MethodInfo),
    Function(CodeInfo),
}

/// A named, typed unit living in a class or a namespace.
#[derive(Debug, Clone, Serialize)]
pub struct Member {
    pub(crate) name: String,
    pub(crate) line: usize,
    #[serde(rename = "type")]
    pub(crate) type_ref: TypeRef,
    pub(crate) storage: Option<Storage>,
    pub(crate) modifiers: Vec<Modifier>,
    pub(crate) is_pointer: bool,
    pub(crate) is_reference: bool,
    pub(crate) visibility: Visibility,
    #[serde(skip)]
    pub(crate) container: Option<ContainerId>,
    #[serde(flatten)]
    pub(crate) kind: MemberKind,
}

impl Member {
    fn new(line: usize, name: &str, type_ref: TypeRef, kind: MemberKind) -> Self {
        Self {
            name: name.to_string(),
            line,
            type_ref,
            storage: None,
            modifiers: Vec::new(),
            is_pointer: false,
            is_reference: false,
            visibility: Visibility::Private,
            container: None,
            kind,
        }
    }

    pub fn attribute(line: usize, name: &str, type_ref: TypeRef) -> Self {
        Self::new(line, name, type_ref, MemberKind::Attribute(DataInfo::default()))
    }

    pub fn constant(line: usize, name: &str, type_ref: TypeRef) -> Self {
        let mut constant = Self::new(line, name, type_ref, MemberKind::Constant(DataInfo::default()));
        constant.visibility = Visibility::Public;
        constant
    }

    pub fn method(line: usize, name: &str, type_ref: TypeRef) -> Self {
        Self::new(line, name, type_ref, MemberKind::Method(MethodInfo::default()))
    }

    pub fn function(line: usize, name: &str, type_ref: TypeRef) -> Self {
        let mut function = Self::new(line, name, type_ref, MemberKind::Function(CodeInfo::default()));
        function.visibility = Visibility::Public;
        function
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn line(&self) -> usize {
        self.line
    }

    pub fn type_ref(&self) -> &TypeRef {
        &self.type_ref
    }

    pub fn kind(&self) -> &MemberKind {
        &self.kind
    }

    pub fn container(&self) -> Option<ContainerId> {
        self.container
    }

    pub fn storage(&self) -> Option<Storage> {
        self.storage
    }

    pub fn set_storage(&mut self, storage: Option<Storage>) {
        self.storage = storage;
    }

    pub fn is_static(&self) -> bool {
        self.storage == Some(Storage::Static)
    }

    pub fn is_inline(&self) -> bool {
        self.storage == Some(Storage::Inline)
    }

    pub fn modifiers(&self) -> &[Modifier] {
        &self.modifiers
    }

    pub fn set_modifiers(&mut self, modifiers: Vec<Modifier>) {
        self.modifiers = modifiers;
    }

    pub fn has_modifier(&self, modifier: Modifier) -> bool {
        self.modifiers.contains(&modifier)
    }

    pub fn is_virtual(&self) -> bool {
        self.has_modifier(Modifier::Virtual)
    }

    pub fn visibility(&self) -> Visibility {
        self.visibility
    }

    pub fn set_visibility(&mut self, visibility: Visibility) {
        self.visibility = visibility;
    }

    pub fn is_pointer(&self) -> bool {
        self.is_pointer
    }

    pub fn is_reference(&self) -> bool {
        self.is_reference
    }

    pub fn set_pointer(&mut self, is_pointer: bool) {
        self.is_pointer = is_pointer;
    }

    pub fn set_reference(&mut self, is_reference: bool) {
        self.is_reference = is_reference;
    }

    /// `*` or `&`; pointer wins if both were flagged.
    pub fn indirection_mark(&self) -> &'static str {
        if self.is_pointer {
            "*"
        } else if self.is_reference {
            "&"
        } else {
            ""
        }
    }

    pub fn initial_value(&self) -> &str {
        match &self.kind {
            MemberKind::Attribute(data) | MemberKind::Constant(data) => &data.initial_value,
            _ => "",
        }
    }

    pub fn set_initial_value(&mut self, value: &str) -> Result<()> {
        let is_static = self.is_static();
        match &mut self.kind {
            MemberKind::Attribute(data) => {
                if !is_static {
                    return Err(Cp3Error::semantic(
                        "attribute must be static to have an inital value",
                    ));
                }
                data.initial_value = value.to_string();
                Ok(())
            }
            MemberKind::Constant(data) => {
                data.initial_value = value.to_string();
                Ok(())
            }
            _ => Err(Cp3Error::semantic(format!(
                "{} is not a data member, it cannot be initialized",
                self.name
            ))),
        }
    }

    fn code(&self) -> Option<&CodeInfo> {
        match &self.kind {
            MemberKind::Method(method) => Some(&method.code),
            MemberKind::Function(code) => Some(code),
            _ => None,
        }
    }

    fn code_mut(&mut self) -> Option<&mut CodeInfo> {
        match &mut self.kind {
            MemberKind::Method(method) => Some(&mut method.code),
            MemberKind::Function(code) => Some(code),
            _ => None,
        }
    }

    pub fn parameters(&self) -> &str {
        self.code().map(|code| code.parameters.as_str()).unwrap_or_default()
    }

    pub fn body(&self) -> &str {
        self.code().map(|code| code.body.as_str()).unwrap_or_default()
    }

    pub fn set_parameters(&mut self, parameters: &str) {
        if let Some(code) = self.code_mut() {
            code.parameters = parameters.trim().to_string();
        }
    }

    pub fn set_body(&mut self, body: &str) -> Result<()> {
        if self.is_pure_virtual() && !body.is_empty() {
            return Err(Cp3Error::semantic(
                "pure virtual functions cannot have implementation",
            ));
        }

        if let Some(code) = self.code_mut() {
            code.body = body.to_string();
        }
        Ok(())
    }

    pub fn as_method(&self) -> Option<&MethodInfo> {
        match &self.kind {
            MemberKind::Method(method) => Some(method),
            _ => None,
        }
    }

    fn as_method_mut(&mut self) -> Result<&mut MethodInfo> {
        match &mut self.kind {
            MemberKind::Method(method) => Ok(method),
            _ => Err(Cp3Error::semantic(format!("{} is not a method", self.name))),
        }
    }

    pub fn is_pure_virtual(&self) -> bool {
        self.as_method().is_some_and(|method| method.pure_virtual)
    }

    pub fn is_const_method(&self) -> bool {
        self.as_method().is_some_and(|method| method.const_method)
    }

    pub fn quick_init_list(&self) -> &str {
        self.as_method()
            .map(|method| method.quick_init_list.as_str())
            .unwrap_or_default()
    }

    pub fn set_const_method(&mut self) -> Result<()> {
        self.as_method_mut()?.const_method = true;
        Ok(())
    }

    pub fn set_quick_init_list(&mut self, list: &str) -> Result<()> {
        self.as_method_mut()?.quick_init_list = list.to_string();
        Ok(())
    }

    /// Marks the method as `= 0`, adding the `virtual` modifier if missing.
    pub fn set_pure_virtual(&mut self) -> Result<()> {
        if !self.body().is_empty() {
            return Err(Cp3Error::semantic(
                "pure virtual functions cannot have implementation",
            ));
        }

        self.as_method_mut()?.pure_virtual = true;
        if !self.is_virtual() {
            self.modifiers.push(Modifier::Virtual);
        }
        Ok(())
    }

    /// True when the name matches the enclosing class name.
    pub fn is_constructor_of(&self, class_name: &str) -> bool {
        self.as_method().is_some() && self.name == class_name
    }

    pub fn is_destructor_of(&self, class_name: &str) -> bool {
        self.as_method().is_some()
            && self.name.strip_prefix('~').is_some_and(|rest| rest == class_name)
    }
}

/// The top-level `main` function. Lives outside every container.
#[derive(Debug, Clone, Serialize)]
pub struct EntryPoint {
    pub(crate) function: Member,
}

impl EntryPoint {
    pub fn new(line: usize) -> Self {
        Self {
            function: Member::function(line, MAIN_FUNCTION, TypeRef::Native(NativeType::Int)),
        }
    }

    pub fn function(&self) -> &Member {
        &self.function
    }

    pub fn function_mut(&mut self) -> &mut Member {
        &mut self.function
    }

    pub fn line(&self) -> usize {
        self.function.line
    }
}
