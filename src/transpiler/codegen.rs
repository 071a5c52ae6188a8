use crate::model::keywords::{Modifier, Storage, Visibility, ACCESS_OPERATOR, RWORD_CLASS, RWORD_EXTERN};
use crate::model::{ContainerId, EntryPoint, Member, MemberKind, Module};
use once_cell::sync::Lazy;
use std::collections::HashSet;
use std::path::Path;

pub const MODULE_PREFIX: &str = "__MODULE__";

/// Basenames of the standard library headers never recorded as dependencies.
static STANDARD_HEADERS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "algorithm", "bitset", "cassert", "assert.h", "cctype", "ctype.h", "cerrno", "errno.h",
        "cfloat", "float.h", "ciso646", "iso646.h", "climits", "limits.h", "clocale",
        "locale.h", "cmath", "math.h", "complex", "csetjmp", "setjmp.h", "csignal", "signal.h",
        "cstdarg", "stdarg.h", "cstddef", "stddef.h", "cstdio", "stdio.h", "cstdlib",
        "stdlib.h", "cstring", "string.h", "ctime", "time.h", "deque", "exception", "fstream",
        "functional", "iomanip", "ios", "iosfwd", "iostream", "istream", "iterator", "limits",
        "list", "locale", "map", "memory", "new", "numeric", "ostream", "queue", "set",
        "sstream", "stack", "stdexcept", "strstream", "streambuf", "string", "typeinfo",
        "utility", "valarray", "vector",
    ]
    .into_iter()
    .collect()
});

/// Dependency filter: the fixed standard header table plus configured extras.
#[derive(Debug, Clone, Default)]
pub struct StandardHeaders {
    extra: HashSet<String>,
}

impl StandardHeaders {
    pub fn with_extra<I, S>(extra: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            extra: extra.into_iter().map(Into::into).collect(),
        }
    }

    pub fn contains(&self, file_name: &str) -> bool {
        STANDARD_HEADERS.contains(file_name) || self.extra.contains(file_name)
    }
}

/// Text each member kind produces for the two output streams.
pub trait Render {
    /// Declaration for the header.
    fn prototype(&self, module: &Module) -> String;

    /// Out-of-line definition for the implementation file, empty when none applies.
    fn implementation(&self, module: &Module) -> String;

    /// Full definition written straight into the header.
    fn inline(&self, module: &Module) -> String;
}

/// `#line N "file"`, pointing back at the module source.
pub fn line_marker(line: usize, source_file: &str) -> String {
    let base = Path::new(source_file)
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or(source_file);
    format!("#line {line} \"{base}\"")
}

pub fn guard_symbol(module_name: &str) -> String {
    format!("{MODULE_PREFIX}{}_", module_name.to_uppercase())
}

pub fn guard_open(module_name: &str) -> [String; 2] {
    let symbol = guard_symbol(module_name);
    [format!("#ifndef {symbol}"), format!("#define {symbol}")]
}

pub fn guard_close(module_name: &str) -> String {
    format!("#endif // module {module_name}")
}

/// Removes `= value` fragments from a parameter list. Commas nested in
/// parentheses, brackets or template arguments do not split parameters.
/// Inside a default value `<` opens template arguments only when glued to
/// a name (`map<int, int>()`), so `a < c` stays a comparison.
pub fn strip_default_values(parameters: &str) -> String {
    let mut pieces = Vec::new();
    let mut current = String::new();
    let mut nesting = 0usize;
    let mut angles = 0usize;
    let mut in_default = false;
    let mut previous = ' ';

    for ch in parameters.chars() {
        match ch {
            '(' | '[' | '{' => nesting += 1,
            ')' | ']' | '}' => nesting = nesting.saturating_sub(1),
            '<' if !in_default || previous.is_alphanumeric() || previous == '_' => angles += 1,
            '>' => angles = angles.saturating_sub(1),
            ',' if nesting == 0 && angles == 0 => {
                pieces.push(current.trim().to_string());
                current.clear();
                in_default = false;
                previous = ch;
                continue;
            }
            '=' if nesting == 0 && angles == 0 => in_default = true,
            _ => {}
        }

        if !in_default {
            current.push(ch);
        }
        previous = ch;
    }

    if !current.trim().is_empty() || !pieces.is_empty() {
        pieces.push(current.trim().to_string());
    }

    pieces.join(", ")
}

/// `class A : public B, private C {`, prefixed with the class visibility
/// when nested inside another class.
pub fn class_declaration(module: &Module, id: ContainerId) -> String {
    let class = module.container(id);
    let mut declaration = String::new();

    let nested_in_class = class
        .parent()
        .is_some_and(|parent| module.container(parent).is_class());

    if let (true, Some(data)) = (nested_in_class, class.as_class()) {
        declaration.push_str(&format!("{}: ", data.class_visibility()));
    }

    declaration.push_str(&format!("{RWORD_CLASS} {}", class.name()));

    if let Some(data) = class.as_class() {
        if !data.parents().is_empty() {
            let parents: Vec<String> = data
                .parents()
                .iter()
                .map(|parent| format!("{} {}", parent.visibility(), parent.name()))
                .collect();
            declaration.push_str(" : ");
            declaration.push_str(&parents.join(", "));
        }
    }

    declaration.push_str(" {");
    declaration
}

pub fn class_closing(name: &str) -> String {
    format!("}}; // class {name}")
}

pub fn namespace_opening(name: &str) -> String {
    format!("namespace {name} {{")
}

pub fn namespace_closing(name: &str) -> String {
    format!("}} // namespace {name}")
}

/// Non-empty fields separated by single spaces.
fn join_fields(fields: &[String]) -> String {
    fields
        .iter()
        .filter(|field| !field.is_empty())
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(" ")
}

fn storage_text(storage: Option<Storage>) -> &'static str {
    storage.map(|storage| storage.as_str()).unwrap_or_default()
}

fn interface_modifiers(member: &Member) -> String {
    member
        .modifiers()
        .iter()
        .map(Modifier::as_str)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Out-of-line definitions repeat neither `explicit` nor `virtual`.
fn implementation_modifiers(member: &Member) -> String {
    member
        .modifiers()
        .iter()
        .filter(|modifier| !matches!(modifier, Modifier::Explicit | Modifier::Virtual))
        .map(Modifier::as_str)
        .collect::<Vec<_>>()
        .join(" ")
}

fn visibility_prefix(visibility: Visibility) -> String {
    format!("{visibility}:")
}

/// Trailing blanks before the closing brace are dropped; line breaks stay.
fn body_block(member: &Member) -> String {
    format!("\n{{{}}}", member.body().trim_end_matches([' ', '\t']))
}

fn parameter_list(parameters: &str) -> String {
    format!("({parameters})")
}

/// Return type with the indirection mark attached, empty for constructors
/// and destructors.
fn code_type(module: &Module, member: &Member) -> String {
    if module.is_constructor(member) || module.is_destructor(member) {
        return String::new();
    }
    format!("{}{}", member.type_ref(), member.indirection_mark())
}

fn data_name(member: &Member, name: &str) -> String {
    format!("{}{}", member.indirection_mark(), name)
}

fn method_tail(member: &Member) -> (&'static str, &'static str) {
    let const_mark = if member.is_const_method() { "const" } else { "" };
    let pure_mark = if member.is_pure_virtual() { "= 0" } else { "" };
    (const_mark, pure_mark)
}

fn quick_list(member: &Member) -> String {
    match member.quick_init_list() {
        "" => String::new(),
        list => format!(": {list}"),
    }
}

/// Namespace functions declared private get internal linkage.
fn function_storage(member: &Member) -> Option<Storage> {
    if member.visibility() == Visibility::Private {
        Some(Storage::Static)
    } else {
        member.storage()
    }
}

impl Render for Member {
    fn prototype(&self, module: &Module) -> String {
        match self.kind() {
            MemberKind::Attribute(_) => {
                let fields = [
                    visibility_prefix(self.visibility()),
                    storage_text(self.storage()).to_string(),
                    interface_modifiers(self),
                    self.type_ref().to_string(),
                    data_name(self, self.name()),
                ];
                format!("{};", join_fields(&fields))
            }
            MemberKind::Constant(_) => {
                let fields = [
                    RWORD_EXTERN.to_string(),
                    storage_text(self.storage()).to_string(),
                    interface_modifiers(self),
                    self.type_ref().to_string(),
                    data_name(self, self.name()),
                ];
                format!("{};", join_fields(&fields))
            }
            MemberKind::Method(_) => {
                let (const_mark, pure_mark) = method_tail(self);
                let fields = [
                    visibility_prefix(self.visibility()),
                    storage_text(self.storage()).to_string(),
                    interface_modifiers(self),
                    code_type(module, self),
                    self.name().to_string(),
                    parameter_list(self.parameters()),
                    const_mark.to_string(),
                    pure_mark.to_string(),
                ];
                format!("{};", join_fields(&fields))
            }
            MemberKind::Function(_) => {
                let fields = [
                    storage_text(function_storage(self)).to_string(),
                    interface_modifiers(self),
                    code_type(module, self),
                    self.name().to_string(),
                    parameter_list(self.parameters()),
                ];
                format!("{};", join_fields(&fields))
            }
        }
    }

    fn implementation(&self, module: &Module) -> String {
        let qualified = module.qualified_name(self);

        match self.kind() {
            MemberKind::Attribute(_) => {
                if !self.is_static() {
                    return String::new();
                }

                let fields = [
                    implementation_modifiers(self),
                    self.type_ref().to_string(),
                    data_name(self, &qualified),
                ];
                let mut definition = join_fields(&fields);
                if !self.initial_value().is_empty() {
                    definition.push_str(&format!(" = {}", self.initial_value()));
                }
                definition.push(';');
                definition
            }
            MemberKind::Constant(_) => {
                let fields = [
                    storage_text(self.storage()).to_string(),
                    interface_modifiers(self),
                    self.type_ref().to_string(),
                    data_name(self, &qualified),
                ];
                format!(
                    "{}={};",
                    join_fields(&fields),
                    self.initial_value()
                )
            }
            MemberKind::Method(_) => {
                if self.is_pure_virtual() {
                    return String::new();
                }

                let (const_mark, _) = method_tail(self);
                let fields = [
                    implementation_modifiers(self),
                    code_type(module, self),
                    qualified,
                    parameter_list(&strip_default_values(self.parameters())),
                    const_mark.to_string(),
                    quick_list(self),
                ];
                format!(
                    "{}{}",
                    join_fields(&fields),
                    body_block(self)
                )
            }
            MemberKind::Function(_) => {
                let fields = [
                    implementation_modifiers(self),
                    code_type(module, self),
                    qualified,
                    parameter_list(&strip_default_values(self.parameters())),
                ];
                format!(
                    "{}{}",
                    join_fields(&fields),
                    body_block(self)
                )
            }
        }
    }

    fn inline(&self, module: &Module) -> String {
        match self.kind() {
            MemberKind::Attribute(_) => {
                let fields = [
                    visibility_prefix(self.visibility()),
                    storage_text(self.storage()).to_string(),
                    interface_modifiers(self),
                    self.type_ref().to_string(),
                    data_name(self, self.name()),
                ];
                let mut definition = join_fields(&fields);
                if !self.initial_value().is_empty() {
                    definition.push_str(&format!(" = {}", self.initial_value()));
                }
                definition.push(';');
                definition
            }
            MemberKind::Constant(_) => {
                let fields = [
                    storage_text(self.storage()).to_string(),
                    interface_modifiers(self),
                    self.type_ref().to_string(),
                    data_name(self, self.name()),
                ];
                format!(
                    "{}={};",
                    join_fields(&fields),
                    self.initial_value()
                )
            }
            MemberKind::Method(_) => {
                let (const_mark, _) = method_tail(self);
                let fields = [
                    visibility_prefix(self.visibility()),
                    interface_modifiers(self),
                    code_type(module, self),
                    self.name().to_string(),
                    parameter_list(self.parameters()),
                    const_mark.to_string(),
                    quick_list(self),
                ];
                format!(
                    "{}{}",
                    join_fields(&fields),
                    body_block(self)
                )
            }
            MemberKind::Function(_) => {
                let fields = [
                    storage_text(self.storage()).to_string(),
                    interface_modifiers(self),
                    code_type(module, self),
                    self.name().to_string(),
                    parameter_list(self.parameters()),
                ];
                format!(
                    "{}{}",
                    join_fields(&fields),
                    body_block(self)
                )
            }
        }
    }
}

impl Render for EntryPoint {
    fn prototype(&self, _module: &Module) -> String {
        String::new()
    }

    fn implementation(&self, module: &Module) -> String {
        let function = self.function();
        let fields = [
            function.type_ref().to_string(),
            module.qualified_name(function),
            parameter_list(function.parameters()),
        ];
        format!(
            "{}{}",
            join_fields(&fields),
            body_block(function)
        )
    }

    fn inline(&self, _module: &Module) -> String {
        String::new()
    }
}

/// Joins a dotted or `::`-qualified reference with `::`.
pub fn scoped_name(reference: &str) -> String {
    reference.replace('.', ACCESS_OPERATOR)
}
