pub mod tests;

use crate::model::keywords::{
    is_reserved, Modifier, NativeType, Storage, TypeRef, Visibility, ACCESS_OPERATOR,
    MAIN_FUNCTION, RWORD_CLASS, RWORD_IMPORT, RWORD_INCLUDE, RWORD_NAMESPACE, RWORD_TYPEDEF,
    RWORD_USING, SEMICOLON,
};
use crate::model::{EntryPoint, Member, Module, ParseState, Parent, Strictness};
use crate::transpiler::codegen::{self, Render, StandardHeaders};
use crate::transpiler::lexer::{Lexer, TokenKind};
use crate::transpiler::validation::errors::{Cp3Error, Result};
use crate::transpiler::validation::{check_entry_point, check_member, check_module};
use crate::transpiler::{header_name_for, HEADER_EXT};
use std::io::Write;
use std::path::Path;
use tracing::debug;

/// Single-pass translator from module source to a header/implementation pair.
///
/// Every construct is rendered and written as soon as it is complete; there
/// is no separate generation phase. Errors abort the pass, leaving whatever
/// was already written in the output streams.
pub struct Translator<H: Write, I: Write> {
    lexer: Lexer,
    module: Module,
    header: H,
    implementation: I,
    strictness: Strictness,
}

/// Storage, modifiers, type and name shared by every member kind.
struct MemberHead {
    line: usize,
    storage: Option<Storage>,
    modifiers: Vec<Modifier>,
    type_ref: TypeRef,
    name: String,
    is_pointer: bool,
    is_reference: bool,
}

impl MemberHead {
    fn build(self, make: fn(usize, &str, TypeRef) -> Member, visibility: Visibility) -> Member {
        let mut member = make(self.line, &self.name, self.type_ref);
        member.set_storage(self.storage);
        member.set_modifiers(self.modifiers);
        member.set_visibility(visibility);
        member.set_pointer(self.is_pointer);
        member.set_reference(self.is_reference);
        member
    }
}

impl<H: Write, I: Write> Translator<H, I> {
    /// Prepares a translation and writes both preambles: the header include
    /// into the implementation and the include guard into the header.
    pub fn new(
        source: &str,
        file_name: &str,
        header: H,
        implementation: I,
        strictness: Strictness,
    ) -> Result<Self> {
        let stem = Path::new(file_name)
            .file_stem()
            .and_then(|stem| stem.to_str())
            .unwrap_or(file_name);

        let mut translator = Self {
            lexer: Lexer::new(source, file_name),
            module: Module::new(stem),
            header,
            implementation,
            strictness,
        };

        translator.write_implementation(&format!("#include \"{stem}.{HEADER_EXT}\""))?;
        for line in codegen::guard_open(translator.module.name()) {
            translator.write_header(&line)?;
        }
        translator.flush()?;

        Ok(translator)
    }

    pub fn with_standard_headers(mut self, headers: StandardHeaders) -> Self {
        self.module.set_standard_headers(headers);
        self
    }

    pub fn module(&self) -> &Module {
        &self.module
    }

    pub fn strictness(&self) -> Strictness {
        self.strictness
    }

    pub fn line(&self) -> usize {
        self.lexer.line()
    }

    pub fn column(&self) -> usize {
        self.lexer.column()
    }

    pub fn current_line(&self) -> String {
        self.lexer.current_line_text()
    }

    /// Hands back both streams and the finished program model.
    pub fn into_outputs(self) -> (H, I, Module) {
        (self.header, self.implementation, self.module)
    }

    /// Reads every token of the source, writing output as it goes.
    pub fn process(&mut self) -> Result<()> {
        loop {
            self.lexer.skip_delim();
            if self.lexer.is_end() {
                break;
            }

            if self.lexer.next_kind() == TokenKind::SpecialCharacter {
                self.process_special_character()?;
                continue;
            }

            let mark = self.lexer.mark();
            let token = self.lexer.get_token();
            let line = self.lexer.token_line();

            match token.as_str() {
                RWORD_IMPORT => {
                    self.header_marker(line)?;
                    self.process_import()?;
                }
                RWORD_TYPEDEF => {
                    self.header_marker(line)?;
                    self.process_typedef()?;
                }
                RWORD_USING => {
                    self.implementation_marker(line)?;
                    self.process_using()?;
                }
                RWORD_CLASS => {
                    self.header_marker(line)?;
                    self.process_class()?;
                }
                RWORD_NAMESPACE => {
                    self.header_marker(line)?;
                    self.process_namespace()?;
                }
                word => match Visibility::from_keyword(word) {
                    Some(visibility) => self.process_visibility(visibility)?,
                    None => {
                        self.lexer.reset(mark);
                        self.process_member()?;
                    }
                },
            }
        }

        self.write_colophons()?;

        if self.module.has_open_blocks() {
            return Err(self.syntax_error("unexpected module end... missing '}'?"));
        }

        check_module(&self.module, self.strictness)
    }

    fn syntax_error(&self, message: impl Into<String>) -> Cp3Error {
        Cp3Error::Syntax {
            line: self.lexer.line(),
            column: self.lexer.column(),
            source_line: self.lexer.current_line_text(),
            message: message.into(),
        }
    }

    fn write_header(&mut self, text: &str) -> Result<()> {
        writeln!(self.header, "{text}")?;
        Ok(())
    }

    fn write_implementation(&mut self, text: &str) -> Result<()> {
        writeln!(self.implementation, "{text}")?;
        Ok(())
    }

    fn header_marker(&mut self, line: usize) -> Result<()> {
        let marker = codegen::line_marker(line, self.lexer.file_name());
        self.write_header(&marker)
    }

    fn implementation_marker(&mut self, line: usize) -> Result<()> {
        let marker = codegen::line_marker(line, self.lexer.file_name());
        self.write_implementation(&marker)
    }

    fn flush(&mut self) -> Result<()> {
        self.header.flush()?;
        self.implementation.flush()?;
        Ok(())
    }

    fn write_colophons(&mut self) -> Result<()> {
        let guard = codegen::guard_close(self.module.name());
        self.write_header(&guard)?;

        if let Some(entry_point) = self.module.entry_point() {
            let line = entry_point.line();
            let text = entry_point.implementation(&self.module);
            self.implementation_marker(line)?;
            self.write_implementation(&text)?;
        }

        self.write_header("")?;
        self.write_implementation("")?;
        self.flush()
    }

    /// Consumes `delim`, surrounded by optional blanks.
    fn expect(&mut self, delim: &str) -> Result<()> {
        self.lexer.skip_delim();

        for ch in delim.chars() {
            if self.lexer.current_char() != ch {
                return Err(self.syntax_error(format!("expected: {delim}")));
            }
            self.lexer.advance();
        }

        self.lexer.skip_delim();
        Ok(())
    }

    fn literal(&mut self, delim: &str) -> Result<String> {
        match self.lexer.get_literal(delim) {
            Some(text) => Ok(text),
            None => Err(self.syntax_error(format!("expected: {delim}"))),
        }
    }

    fn balanced(&mut self, open: char, close: char) -> Result<String> {
        match self.lexer.get_balanced(open, close) {
            Some(text) => Ok(text),
            None => Err(self.syntax_error(format!("expected: {close}"))),
        }
    }

    fn process_special_character(&mut self) -> Result<()> {
        match self.lexer.current_char() {
            '/' => self.process_comment(),
            '#' => {
                self.header_marker(self.lexer.line())?;
                self.process_directive()
            }
            '}' => {
                self.process_ending()?;
                self.header_marker(self.lexer.line())
            }
            '~' if self.module.state() == ParseState::ClassLevel => self.process_member(),
            other => Err(self.syntax_error(format!("bug character {other}"))),
        }
    }

    fn process_comment(&mut self) -> Result<()> {
        self.lexer.advance();

        match self.lexer.current_char() {
            '/' => {
                self.lexer.skip_line();
                Ok(())
            }
            '*' => {
                self.lexer.advance();
                self.literal("*/").map(|_| ())
            }
            _ => Err(self.syntax_error("malformed comment")),
        }
    }

    fn process_directive(&mut self) -> Result<()> {
        self.lexer.advance();
        let directive = self.lexer.get_token();

        if directive != RWORD_INCLUDE {
            return Err(self.syntax_error("no other directives than include allowed"));
        }

        if self.module.state() != ParseState::TopLevel {
            return Err(self.syntax_error("misplaced include"));
        }

        self.lexer.skip_delim();
        let (open, close) = match self.lexer.current_char() {
            '"' => ('"', "\""),
            '<' => ('<', ">"),
            _ => return Err(self.syntax_error("malformed include: file name expected")),
        };

        self.lexer.advance();
        let file_name = self.literal(close)?;
        let file_name = header_name_for(file_name.trim());

        if open == '"' {
            self.module.add_dependency(&file_name);
        }

        self.write_header(&format!("#{RWORD_INCLUDE} {open}{file_name}{close}"))
    }

    fn process_ending(&mut self) -> Result<()> {
        let Some(closed) = self.module.close() else {
            return Err(self.syntax_error("unexpected }, nothing to close"));
        };
        self.lexer.advance();

        let container = self.module.container(closed);
        let name = container.name().to_string();

        if container.is_class() {
            self.write_header(&codegen::class_closing(&name))?;

            self.lexer.skip_delim();
            if self.lexer.current_char() == SEMICOLON {
                self.lexer.advance();
                self.lexer.skip_delim();
            }
        } else {
            self.write_header(&codegen::namespace_closing(&name))?;
        }

        Ok(())
    }

    /// `a.b::c`, as used by imports and namespaces.
    fn read_reference(&mut self) -> Result<String> {
        self.lexer.skip_delim();
        let mut reference = String::new();

        if self.lexer.current_char() == ':' {
            self.expect(ACCESS_OPERATOR)?;
            reference.push_str(ACCESS_OPERATOR);
        }

        reference.push_str(&self.lexer.get_token());
        self.lexer.skip_delim();

        loop {
            match self.lexer.current_char() {
                '.' => {
                    self.lexer.advance();
                    reference.push('.');
                }
                ':' => {
                    self.expect(ACCESS_OPERATOR)?;
                    reference.push_str(ACCESS_OPERATOR);
                }
                _ => break,
            }

            reference.push_str(&self.lexer.get_token());
            self.lexer.skip_delim();
        }

        Ok(reference)
    }

    /// `std::vector<int>`: a `::`-qualified name with optional template arguments.
    fn read_type_reference(&mut self) -> Result<String> {
        self.lexer.skip_delim();
        let mut reference = String::new();

        if self.lexer.current_char() == ':' {
            self.expect(ACCESS_OPERATOR)?;
            reference.push_str(ACCESS_OPERATOR);
        }

        reference.push_str(&self.lexer.get_token());
        self.lexer.skip_delim();

        loop {
            match self.lexer.current_char() {
                ':' => {
                    self.expect(ACCESS_OPERATOR)?;
                    reference.push_str(ACCESS_OPERATOR);
                }
                '<' => {
                    self.lexer.advance();
                    let arguments = self.balanced('<', '>')?;
                    reference.push('<');
                    reference.push_str(arguments.trim());
                    reference.push('>');
                    // The next word, if any, is the member name.
                    self.lexer.skip_delim();
                    continue;
                }
                _ => break,
            }

            reference.push_str(&self.lexer.get_token());
            self.lexer.skip_delim();
        }

        Ok(reference)
    }

    fn process_import(&mut self) -> Result<()> {
        if self.module.state() != ParseState::TopLevel {
            return Err(self.syntax_error("misplaced import"));
        }

        let reference = self.read_reference()?;
        if reference.is_empty() {
            return Err(self.syntax_error("malformed import: file name expected"));
        }

        let file_name = format!("{reference}.{HEADER_EXT}");
        self.module.add_dependency(&file_name);
        self.write_header(&format!("#{RWORD_INCLUDE} \"{file_name}\""))?;
        self.expect(";")
    }

    fn process_typedef(&mut self) -> Result<()> {
        if !matches!(
            self.module.state(),
            ParseState::NamespaceLevel | ParseState::ClassLevel
        ) {
            return Err(self.syntax_error("misplaced typedef"));
        }

        self.lexer.skip_delim();
        let contents = self.literal(";")?;
        self.write_header(&format!("{RWORD_TYPEDEF} {};", contents.trim()))
    }

    fn read_scoped_id(&mut self) -> Result<String> {
        let mut id = self.lexer.get_token();
        self.lexer.skip_delim();

        while self.lexer.current_char() == ':' {
            self.expect(ACCESS_OPERATOR)?;
            id.push_str(ACCESS_OPERATOR);
            id.push_str(&self.lexer.get_token());
            self.lexer.skip_delim();
        }

        Ok(id)
    }

    fn process_using(&mut self) -> Result<()> {
        if self.module.state() != ParseState::TopLevel {
            return Err(self.syntax_error("misplaced using"));
        }

        let mark = self.lexer.mark();
        let statement = if self.lexer.get_token() == RWORD_NAMESPACE {
            format!("{RWORD_USING} {RWORD_NAMESPACE} {};", self.read_scoped_id()?)
        } else {
            self.lexer.reset(mark);
            format!("{RWORD_USING} {};", self.read_scoped_id()?)
        };

        self.write_implementation(&statement)?;
        self.expect(";")
    }

    fn process_visibility(&mut self, visibility: Visibility) -> Result<()> {
        let Some(current) = self.module.current() else {
            return Err(self.syntax_error("misplaced visibility keyword"));
        };

        self.module
            .container_mut(current)
            .set_current_visibility(visibility)?;
        self.expect(":")
    }

    fn process_namespace(&mut self) -> Result<()> {
        if self.module.state() == ParseState::ClassLevel {
            return Err(self.syntax_error("misplaced namespace"));
        }

        let name = codegen::scoped_name(&self.read_reference()?);
        if name.is_empty() {
            return Err(self.syntax_error("namespace name expected"));
        }

        self.expect("{")?;
        self.module.open_namespace(&name)?;
        self.write_header(&codegen::namespace_opening(&name))
    }

    fn process_class(&mut self) -> Result<()> {
        if self.module.current_namespace().is_none() {
            return Err(self.syntax_error("misplaced class: namespace not yet defined"));
        }

        let name = self.lexer.get_token();
        if name.is_empty() {
            return Err(self.syntax_error("class name expected"));
        }

        self.lexer.skip_delim();
        if self.lexer.current_char() == SEMICOLON {
            self.lexer.advance();
            debug!(class = %name, "forward declaration");
            self.module.add_dependency(&name);
            return Ok(());
        }

        let mut parents = Vec::new();
        if self.lexer.current_char() == ':' {
            loop {
                self.lexer.advance();
                let keyword = self.lexer.get_token();
                let Some(visibility) = Visibility::from_keyword(&keyword) else {
                    return Err(self.syntax_error("expected parent class visibility"));
                };

                let parent = self.read_type_reference()?;
                parents.push(Parent::new(&parent, visibility)?);

                self.lexer.skip_delim();
                if self.lexer.current_char() != ',' {
                    break;
                }
            }
        }

        self.expect("{")?;
        let id = self.module.open_class(&name, parents)?;
        let declaration = codegen::class_declaration(&self.module, id);
        self.write_header(&declaration)
    }

    /// Reads storage, modifiers, type, indirection and name of a member.
    fn read_member_head(&mut self) -> Result<MemberHead> {
        self.lexer.skip_delim();
        let line = self.lexer.line();
        let class_name = match self.module.state() {
            ParseState::ClassLevel => self
                .module
                .current()
                .map(|id| self.module.container(id).name().to_string()),
            _ => None,
        };

        let mut mark = self.lexer.mark();
        let mut token = self.lexer.get_token();

        let storage = Storage::from_keyword(&token);
        if storage.is_some() {
            mark = self.lexer.mark();
            token = self.lexer.get_token();
        }

        let mut modifiers = Vec::new();
        while let Some(modifier) = Modifier::from_keyword(&token) {
            modifiers.push(modifier);
            mark = self.lexer.mark();
            token = self.lexer.get_token();
        }

        let mut is_destructor = false;
        if token.is_empty() && self.lexer.current_char() == '~' {
            self.lexer.advance();
            token = self.lexer.get_token();
            is_destructor = true;

            if class_name.as_deref() != Some(token.as_str()) {
                return Err(self.syntax_error("invalid destructor"));
            }
        }

        let names_class = class_name.as_deref() == Some(token.as_str());
        let is_structor = is_destructor || (names_class && self.at_parameter_list());

        let mut head = MemberHead {
            line,
            storage,
            modifiers,
            type_ref: TypeRef::default(),
            name: String::new(),
            is_pointer: false,
            is_reference: false,
        };

        if is_structor {
            head.name = if is_destructor { format!("~{token}") } else { token };
        } else {
            head.type_ref = match NativeType::from_keyword(&token) {
                Some(native) => TypeRef::Native(native),
                None => {
                    self.lexer.reset(mark);
                    let user_type = self.read_type_reference()?;
                    if user_type.is_empty() {
                        return Err(self.syntax_error("invalid member: type expected"));
                    }
                    TypeRef::User(user_type)
                }
            };

            self.lexer.skip_delim();
            if self.lexer.current_char() == '*' {
                self.lexer.advance();
                self.lexer.skip_delim();
                head.is_pointer = true;
            }
            if self.lexer.current_char() == '&' {
                self.lexer.advance();
                head.is_reference = true;
            }

            head.name = self.lexer.get_token();
        }

        if head.name.is_empty() {
            return Err(self.syntax_error("invalid id: missing member name"));
        }
        if is_reserved(&head.name) {
            return Err(self.syntax_error("invalid id: keyword chosen"));
        }

        self.lexer.skip_delim();
        Ok(head)
    }

    fn at_parameter_list(&mut self) -> bool {
        self.lexer.skip_delim();
        self.lexer.current_char() == '('
    }

    fn process_member(&mut self) -> Result<()> {
        let state = self.module.state();
        let head = self.read_member_head()?;
        let next = self.lexer.current_char();

        let member = match (next, state) {
            ('=' | ';', ParseState::ClassLevel) => self.process_attribute(head)?,
            ('=' | ';', ParseState::NamespaceLevel) => self.process_constant(head)?,
            ('=' | ';', ParseState::TopLevel) => {
                return Err(self.syntax_error(
                    "constants must be defined at least inside a namespace",
                ));
            }
            ('(', ParseState::ClassLevel) => self.process_method(head)?,
            ('(', ParseState::NamespaceLevel) => self.process_function(head)?,
            ('(', ParseState::TopLevel)
                if head.name == MAIN_FUNCTION
                    && head.type_ref == TypeRef::Native(NativeType::Int) =>
            {
                return self.process_main_function(head);
            }
            ('(', ParseState::TopLevel) => {
                return Err(self.syntax_error(
                    "functions must be defined at least inside a namespace",
                ));
            }
            (_, ParseState::ClassLevel) => {
                return Err(self.syntax_error("invalid member: expected function or field"));
            }
            _ => {
                return Err(self.syntax_error("invalid member: expected function or constant"));
            }
        };

        self.emit_member(member)
    }

    fn current_visibility(&self) -> Visibility {
        self.module
            .current()
            .map(|id| self.module.container(id).current_visibility())
            .unwrap_or(Visibility::Public)
    }

    fn process_attribute(&mut self, head: MemberHead) -> Result<Member> {
        let mut attribute = head.build(Member::attribute, self.current_visibility());

        if self.lexer.current_char() == '=' {
            self.lexer.advance();
            self.lexer.skip_delim();
            let value = self.literal(";")?;
            attribute.set_initial_value(value.trim())?;
        } else {
            self.expect(";")?;
        }

        Ok(attribute)
    }

    fn process_constant(&mut self, head: MemberHead) -> Result<Member> {
        let mut constant = head.build(Member::constant, Visibility::Public);

        if self.lexer.current_char() == '=' {
            self.lexer.advance();
            self.lexer.skip_delim();
            let value = self.literal(";")?;

            if !constant.has_modifier(Modifier::Const) {
                return Err(self.syntax_error("namespace member field must be constant"));
            }
            constant.set_initial_value(value.trim())?;
        } else {
            self.expect(";")?;
        }

        Ok(constant)
    }

    fn read_parameters(&mut self) -> Result<String> {
        if self.lexer.current_char() != '(' {
            return Err(self.syntax_error("expected '(' for parameters"));
        }
        self.lexer.advance();
        let parameters = self.balanced('(', ')')?;
        self.lexer.skip_delim();
        Ok(parameters)
    }

    fn process_method(&mut self, head: MemberHead) -> Result<Member> {
        let mut method = head.build(Member::method, self.current_visibility());
        let parameters = self.read_parameters()?;
        method.set_parameters(&parameters);

        let mark = self.lexer.mark();
        if self.lexer.get_token() == Modifier::Const.as_str() {
            method.set_const_method()?;
        } else {
            self.lexer.reset(mark);
        }

        self.lexer.skip_delim();
        match self.lexer.current_char() {
            SEMICOLON => {
                self.lexer.advance();
                method.set_pure_virtual()?;
            }
            '=' => {
                self.lexer.advance();
                self.lexer.skip_delim();
                if self.lexer.current_char() != '0' {
                    return Err(self.syntax_error("'=0;' expected"));
                }
                self.lexer.advance();
                self.expect(";")?;
                method.set_pure_virtual()?;
            }
            _ => {
                if self.lexer.current_char() == ':' {
                    let list = self.read_quick_init_list()?;
                    method.set_quick_init_list(&list)?;
                }

                let body = self.read_body_block()?;
                method.set_body(&body)?;
            }
        }

        Ok(method)
    }

    /// `: a(x), b(y)`, kept verbatim apart from spacing between entries.
    fn read_quick_init_list(&mut self) -> Result<String> {
        let mut entries = Vec::new();
        self.lexer.advance();

        loop {
            let field = self.lexer.get_token();
            if field.is_empty() {
                return Err(self.syntax_error("expected a member name in the init list"));
            }

            self.lexer.skip_delim();
            if self.lexer.current_char() != '(' {
                return Err(self.syntax_error("expected an init value in brackets"));
            }
            self.lexer.advance();
            let value = self.balanced('(', ')')?;
            entries.push(format!("{field}({})", value.trim()));

            self.lexer.skip_delim();
            if self.lexer.current_char() != ',' {
                break;
            }
            self.lexer.advance();
        }

        Ok(entries.join(", "))
    }

    fn read_body_block(&mut self) -> Result<String> {
        self.lexer.skip_delim();
        if self.lexer.current_char() != '{' {
            return Err(self.syntax_error("expected '{' for body"));
        }
        self.lexer.advance();
        self.read_body()
    }

    /// Copies a body up to its closing brace. Line breaks crossed become
    /// newlines again so the body keeps its line count, closing brace included.
    fn read_body(&mut self) -> Result<String> {
        let mut body = String::new();
        let mut depth = 0usize;

        while !self.lexer.is_end() {
            for _ in 0..self.lexer.eol_crossed() {
                body.push('\n');
            }

            let ch = self.lexer.current_char();
            if ch == '}' && depth == 0 {
                break;
            }
            body.push(ch);

            match ch {
                '{' => depth += 1,
                '}' => depth -= 1,
                _ => {}
            }
            self.lexer.advance();
        }

        if self.lexer.is_end() {
            return Err(self.syntax_error("unexpected module end inside a body... missing '}'?"));
        }

        self.lexer.advance();
        Ok(body)
    }

    fn process_function(&mut self, head: MemberHead) -> Result<Member> {
        let mut function = head.build(Member::function, self.current_visibility());
        let parameters = self.read_parameters()?;
        let body = self.read_body_block()?;

        function.set_parameters(&parameters);
        function.set_body(&body)?;
        Ok(function)
    }

    fn process_main_function(&mut self, head: MemberHead) -> Result<()> {
        let line = head.line;
        let storage = head.storage;
        let parameters = self
            .read_parameters()
            .map_err(|_| self.syntax_error("missing main() parameters"))?;
        let body = self
            .read_body_block()
            .map_err(|_| self.syntax_error("missing main() body"))?;

        let mut entry_point = EntryPoint::new(line);
        let function = entry_point.function_mut();
        function.set_storage(storage);
        function.set_parameters(&parameters);
        function.set_body(&body)?;

        check_entry_point(&self.module, &entry_point, self.strictness)?;
        debug!(line, "entry point captured");
        self.module.set_entry_point(entry_point)
    }

    /// Attaches, checks and writes a finished member.
    fn emit_member(&mut self, member: Member) -> Result<()> {
        let Some(container) = self.module.current() else {
            return Err(self.syntax_error("misplaced member beginning"));
        };

        let id = self.module.add_member(container, member);
        let member = self.module.member(id);
        check_member(&self.module, member, self.strictness)?;

        let line = member.line();
        debug!(member = member.name(), line, "member emitted");

        if member.is_inline() {
            let text = member.inline(&self.module);
            self.header_marker(line)?;
            return self.write_header(&text);
        }

        let implementation = member.implementation(&self.module);
        let prototype = member.prototype(&self.module);

        if !implementation.is_empty() {
            self.implementation_marker(line)?;
            self.write_implementation(&implementation)?;
        }

        self.header_marker(line)?;
        self.write_header(&prototype)
    }
}
