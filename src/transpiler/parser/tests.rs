#[cfg(test)]
mod tests {
    use crate::config::Config;
    use crate::model::{MemberKind, ParseState, Strictness};
    use crate::transpiler::parser::Translator;
    use crate::transpiler::{translate, ErrorKind, Translation};
    use anyhow::Result;

    fn run(source: &str, file_name: &str) -> crate::transpiler::Result<Translation> {
        translate(source, file_name, &Config::default())
    }

    fn impl_lines(translation: &Translation) -> Vec<&str> {
        translation.implementation.lines().collect()
    }

    fn header_lines(translation: &Translation) -> Vec<&str> {
        translation.header.lines().collect()
    }

    #[test]
    fn test_minimal_class_module() -> Result<()> {
        let translation = run("namespace N {\nclass A {\n}\n}\n", "A.cp3")?;

        assert_eq!(
            translation.header,
            "#ifndef __MODULE__A_\n\
             #define __MODULE__A_\n\
             #line 1 \"A.cp3\"\n\
             namespace N {\n\
             #line 2 \"A.cp3\"\n\
             class A {\n\
             }; // class A\n\
             #line 4 \"A.cp3\"\n\
             } // namespace N\n\
             #line 5 \"A.cp3\"\n\
             #endif // module A\n\
             \n"
        );
        assert_eq!(translation.implementation, "#include \"A.h\"\n\n");
        assert!(translation.dependencies.is_empty());
        assert_eq!(translation.module_name, "A");

        Ok(())
    }

    #[test]
    fn test_dotted_module_names() -> Result<()> {
        let translation = run("namespace Utils.Math {\n}\n", "Utils.Math.mpp")?;

        assert_eq!(translation.module_name, "Utils_Math");
        assert!(translation.implementation.starts_with("#include \"Utils.Math.h\"\n"));
        assert!(translation.header.starts_with("#ifndef __MODULE__UTILS_MATH_\n"));
        assert!(header_lines(&translation).contains(&"namespace Utils::Math {"));
        assert!(header_lines(&translation).contains(&"#line 1 \"Utils.Math.mpp\""));

        Ok(())
    }

    #[test]
    fn test_class_members_split_between_outputs() -> Result<()> {
        let source = "namespace Geometry {\n\
                      class Point {\n\
                      public:\n\
                      \x20   Point(int x, int y) : x(x), y(y) {\n\
                      \x20   }\n\
                      \n\
                      \x20   int getX() const {\n\
                      \x20       return x;\n\
                      \x20   }\n\
                      private:\n\
                      \x20   int x;\n\
                      \x20   int y;\n\
                      }\n\
                      }\n";

        let translation = run(source, "Point.cp3")?;
        let header = header_lines(&translation);

        assert!(header.contains(&"class Point {"));
        assert!(header.contains(&"public: Point (int x, int y);"));
        assert!(header.contains(&"public: int getX () const;"));
        assert!(header.contains(&"private: int x;"));
        assert!(header.contains(&"#line 11 \"Point.cp3\""));

        let implementation = &translation.implementation;
        assert!(implementation.contains(
            "#line 4 \"Point.cp3\"\nGeometry::Point::Point (int x, int y) : x(x), y(y)\n{\n}\n"
        ));
        assert!(implementation.contains(
            "#line 7 \"Point.cp3\"\nint Geometry::Point::getX () const\n{\nreturn x;\n}\n"
        ));
        assert!(!implementation.contains("Point::x"));

        Ok(())
    }

    #[test]
    fn test_one_line_class_scenario() -> Result<()> {
        let source = "namespace N {\nclass A { public: int getX() const { return 0; } };\n}\n";
        let translation = run(source, "A.cp3")?;
        let header = header_lines(&translation);

        let class_at = header.iter().position(|line| *line == "class A {");
        let method_at = header.iter().position(|line| *line == "public: int getX () const;");
        assert!(class_at.is_some() && method_at > class_at, "{:?}", header);
        assert!(translation
            .implementation
            .contains("int N::A::getX () const\n{ return 0;}\n"));

        Ok(())
    }

    #[test]
    fn test_one_line_entry_point() -> Result<()> {
        let translation = run("int main() { return 0; }\n", "m.cp3")?;

        assert!(translation.implementation.ends_with("int main ()\n{ return 0;}\n\n"));
        assert!(!translation.header.contains("main"));
        Ok(())
    }

    #[test]
    fn test_entry_point_is_written_last() -> Result<()> {
        let source = "int main(int argc, char *argv[])\n{\n    return 0;\n}\n";
        let translation = run(source, "prog.cp3")?;

        assert_eq!(
            translation.implementation,
            "#include \"prog.h\"\n\
             #line 1 \"prog.cp3\"\n\
             int main (int argc, char *argv[])\n\
             {\n\
             return 0;\n\
             }\n\
             \n"
        );
        assert!(translation.module.entry_point().is_some());
        assert!(translation.header.ends_with("#endif // module prog\n\n"));

        Ok(())
    }

    #[test]
    fn test_main_twice_is_rejected() {
        let source = "int main() {\n}\nint main() {\n}\n";
        let result = run(source, "prog.cp3");

        assert!(result.is_err(), "a second main should fail: {:?}", result);
        assert_eq!(result.unwrap_err().kind(), ErrorKind::Semantic);
    }

    #[test]
    fn test_main_with_storage_is_rejected() {
        let result = run("static int main() {\n}\n", "prog.cp3");
        assert!(result.is_err(), "static main should fail: {:?}", result);
        assert_eq!(result.unwrap_err().kind(), ErrorKind::Semantic);
    }

    #[test]
    fn test_namespace_constant() -> Result<()> {
        let translation = run("namespace Config {\nconst int Max = 10;\n}\n", "c.cp3")?;

        assert!(header_lines(&translation).contains(&"extern const int Max;"));
        assert!(impl_lines(&translation).contains(&"const int Config::Max=10;"));

        Ok(())
    }

    #[test]
    fn test_constant_must_be_const() {
        let result = run("namespace Config {\nint Max = 10;\n}\n", "c.cp3");

        assert!(result.is_err(), "non-const constant should fail: {:?}", result);
        let error = result.unwrap_err();
        assert_eq!(error.kind(), ErrorKind::Syntax);
        assert_eq!(error.to_string(), "namespace member field must be constant");
    }

    #[test]
    fn test_namespace_functions() -> Result<()> {
        let source = "namespace Util {\n\
                      int twice(int x = 1) {\n\
                      \x20   return 2 * x;\n\
                      }\n\
                      private:\n\
                      int helper() {\n\
                      }\n\
                      }\n";

        let translation = run(source, "util.cp3")?;
        let header = header_lines(&translation);

        assert!(header.contains(&"int twice (int x = 1);"));
        assert!(header.contains(&"static int helper ();"));
        assert!(translation
            .implementation
            .contains("int Util::twice (int x)\n{\nreturn 2 * x;\n}\n"));
        assert!(translation.implementation.contains("int Util::helper ()\n{\n}\n"));

        Ok(())
    }

    #[test]
    fn test_inline_function_stays_in_header() -> Result<()> {
        let source = "namespace Util {\ninline int one() { return 1; }\n}\n";
        let translation = run(source, "util.cp3")?;

        assert!(translation
            .header
            .contains("#line 2 \"util.cp3\"\ninline int one ()\n{ return 1;}\n"));
        assert!(!translation.implementation.contains("one"));

        Ok(())
    }

    #[test]
    fn test_includes_and_imports_record_dependencies() -> Result<()> {
        let source = "#include \"Math.cp3\"\n\
                      #include <vector>\n\
                      #include \"string\"\n\
                      #include \"legacy.hpp\"\n\
                      import Utils.Strings;\n\
                      namespace App {\n\
                      }\n";

        let translation = run(source, "app.cp3")?;
        let header = header_lines(&translation);

        assert!(header.contains(&"#include \"Math.h\""));
        assert!(header.contains(&"#include <vector>"));
        assert!(header.contains(&"#include \"string\""));
        assert!(header.contains(&"#include \"Utils.Strings.h\""));
        assert_eq!(
            translation.dependencies,
            vec!["Math.h", "legacy.hpp", "Utils.Strings.h"]
        );
        assert_eq!(translation.manifest(), "Math.h\nlegacy.hpp\nUtils.Strings.h\n");

        Ok(())
    }

    #[test]
    fn test_extra_standard_headers_are_filtered() -> Result<()> {
        let config = Config {
            extra_standard_headers: vec!["QString".to_string()],
            ..Config::default()
        };
        let source = "#include \"QString\"\nnamespace App {\n}\n";
        let translation = translate(source, "app.cp3", &config)?;

        assert!(translation.dependencies.is_empty());
        Ok(())
    }

    #[test]
    fn test_forward_declaration_is_a_dependency() -> Result<()> {
        let source = "namespace N {\nclass Other;\nclass A {\n}\n}\n";
        let translation = run(source, "a.cp3")?;

        assert_eq!(translation.dependencies, vec!["Other"]);
        assert!(!translation.header.contains("class Other"));
        assert!(translation.header.contains("class A {"));

        Ok(())
    }

    #[test]
    fn test_pure_virtual_methods() -> Result<()> {
        let source = "namespace N {\n\
                      class Shape {\n\
                      public:\n\
                      virtual double area() const = 0;\n\
                      void draw();\n\
                      }\n\
                      }\n";

        let translation = run(source, "shape.cp3")?;
        let header = header_lines(&translation);

        assert!(header.contains(&"public: virtual double area () const = 0;"));
        assert!(header.contains(&"public: virtual void draw () = 0;"));
        assert_eq!(impl_lines(&translation), vec!["#include \"shape.h\"", ""]);

        Ok(())
    }

    #[test]
    fn test_pure_virtual_constructor_is_rejected() {
        let source = "namespace N {\nclass A {\nA();\n}\n}\n";
        let result = run(source, "a.cp3");

        assert!(result.is_err(), "pure virtual constructor should fail: {:?}", result);
        assert_eq!(result.unwrap_err().kind(), ErrorKind::Semantic);
    }

    #[test]
    fn test_static_attribute_gets_a_definition() -> Result<()> {
        let source = "namespace N {\nclass Counter {\nstatic int count = 0;\n}\n}\n";
        let translation = run(source, "counter.cp3")?;

        assert!(header_lines(&translation).contains(&"private: static int count;"));
        assert!(translation
            .implementation
            .contains("#line 3 \"counter.cp3\"\nint N::Counter::count = 0;\n"));

        Ok(())
    }

    #[test]
    fn test_initialized_instance_attribute_is_rejected() {
        let source = "namespace N {\nclass Counter {\nint count = 0;\n}\n}\n";
        let result = run(source, "counter.cp3");

        assert!(result.is_err(), "non-static initializer should fail: {:?}", result);
        let error = result.unwrap_err();
        assert_eq!(error.kind(), ErrorKind::Semantic);
        assert!(error.to_string().contains("static"));
    }

    #[test]
    fn test_destructors() -> Result<()> {
        let source = "namespace N {\n\
                      class A {\n\
                      public:\n\
                      virtual ~A() {\n\
                      }\n\
                      }\n\
                      class B {\n\
                      ~B() {\n\
                      }\n\
                      }\n\
                      }\n";

        let config = Config {
            strictness: Strictness::Medium,
            ..Config::default()
        };
        let translation = translate(source, "a.cp3", &config)?;
        let header = header_lines(&translation);

        assert!(header.contains(&"public: virtual ~A ();"));
        assert!(header.contains(&"private: ~B ();"));
        assert!(translation.implementation.contains("N::A::~A ()\n{\n}\n"));
        assert!(translation.implementation.contains("N::B::~B ()\n{\n}\n"));

        Ok(())
    }

    #[test]
    fn test_destructor_of_another_class_is_rejected() {
        let source = "namespace N {\nclass A {\n~B() {\n}\n}\n}\n";
        let result = run(source, "a.cp3");

        assert!(result.is_err(), "foreign destructor should fail: {:?}", result);
        assert_eq!(result.unwrap_err().to_string(), "invalid destructor");
    }

    #[test]
    fn test_template_member_types() -> Result<()> {
        let source = "namespace N {\n\
                      class A {\n\
                      public:\n\
                      std::vector<int> items;\n\
                      std::vector<int> get() const { return items; }\n\
                      const std::map<int, std::string>& names() const { return table; }\n\
                      }\n\
                      }\n";

        let translation = run(source, "a.cp3")?;
        let header = header_lines(&translation);

        assert!(header.contains(&"public: std::vector<int> items;"), "{:?}", header);
        assert!(header.contains(&"public: std::vector<int> get () const;"));
        assert!(header.contains(&"public: const std::map<int, std::string>& names () const;"));
        assert!(translation
            .implementation
            .contains("std::vector<int> N::A::get () const\n{ return items;}\n"));

        Ok(())
    }

    #[test]
    fn test_template_return_type_of_a_function() -> Result<()> {
        let source = "namespace Util {\nstd::map<int, int> table() {\n}\n}\n";
        let translation = run(source, "util.cp3")?;

        assert!(header_lines(&translation).contains(&"std::map<int, int> table ();"));
        assert!(translation
            .implementation
            .contains("std::map<int, int> Util::table ()\n{\n}\n"));

        Ok(())
    }

    #[test]
    fn test_parents_and_nested_class_visibility() -> Result<()> {
        let source = "namespace N {\n\
                      class B : public A, private std::vector<int> {\n\
                      protected:\n\
                      class Inner {\n\
                      }\n\
                      }\n\
                      }\n";

        let translation = run(source, "b.cp3")?;
        let header = header_lines(&translation);

        assert!(header.contains(&"class B : public A, private std::vector<int> {"));
        assert!(header.contains(&"protected: class Inner {"));
        assert!(header.contains(&"}; // class Inner"));

        Ok(())
    }

    #[test]
    fn test_class_closing_semicolon_is_optional() -> Result<()> {
        let translation = run("namespace N {\nclass A {\n};\n}\n", "a.cp3")?;
        assert!(translation.header.contains("}; // class A\n"));
        Ok(())
    }

    #[test]
    fn test_using_goes_to_the_implementation() -> Result<()> {
        let source = "using namespace std;\nusing std::string;\nnamespace N {\n}\n";
        let translation = run(source, "u.cp3")?;

        assert!(translation.implementation.starts_with(
            "#include \"u.h\"\n\
             #line 1 \"u.cp3\"\n\
             using namespace std;\n\
             #line 2 \"u.cp3\"\n\
             using std::string;\n"
        ));
        assert!(!translation.header.contains("using"));

        Ok(())
    }

    #[test]
    fn test_typedef_inside_namespace() -> Result<()> {
        let source = "namespace N {\ntypedef std::vector<int> Numbers;\n}\n";
        let translation = run(source, "t.cp3")?;

        assert!(header_lines(&translation).contains(&"typedef std::vector<int> Numbers;"));
        Ok(())
    }

    #[test]
    fn test_misplaced_typedef() {
        let result = run("typedef int Number;\n", "t.cp3");
        assert!(result.is_err(), "top-level typedef should fail: {:?}", result);
        assert_eq!(result.unwrap_err().to_string(), "misplaced typedef");
    }

    #[test]
    fn test_blank_lines_survive_in_bodies() -> Result<()> {
        let source = "namespace N {\n\
                      int f() {\n\
                      \x20   int a = 1;\n\
                      \n\
                      \x20   return a;\n\
                      }\n\
                      }\n";

        let translation = run(source, "f.cp3")?;
        assert!(translation
            .implementation
            .contains("int N::f ()\n{\nint a = 1;\n\nreturn a;\n}\n"));

        Ok(())
    }

    #[test]
    fn test_nested_braces_in_bodies() -> Result<()> {
        let source = "namespace N {\nint f(int x) {\nif (x) { return 1; }\nreturn 0;\n}\n}\n";
        let translation = run(source, "f.cp3")?;

        assert!(translation
            .implementation
            .contains("{\nif (x) { return 1; }\nreturn 0;\n}\n"));
        Ok(())
    }

    #[test]
    fn test_comments_are_dropped() -> Result<()> {
        let source = "// leading comment\n/* block\n comment */\nnamespace N {\n}\n";
        let translation = run(source, "c.cp3")?;

        assert!(!translation.header.contains("comment"));
        assert!(header_lines(&translation).contains(&"#line 4 \"c.cp3\""));
        Ok(())
    }

    #[test]
    fn test_unexpected_closing_brace() {
        let result = run("}\n", "e.cp3");

        assert!(result.is_err(), "stray brace should fail: {:?}", result);
        let error = result.unwrap_err();
        assert_eq!(error.kind(), ErrorKind::Syntax);
        assert_eq!(error.line(), Some(1));
        assert_eq!(error.to_string(), "unexpected }, nothing to close");
    }

    #[test]
    fn test_misplaced_import() {
        let result = run("namespace N {\nimport Other;\n}\n", "e.cp3");

        assert!(result.is_err(), "import inside namespace should fail: {:?}", result);
        let error = result.unwrap_err();
        assert_eq!(error.to_string(), "misplaced import");
        assert_eq!(error.line(), Some(2));
    }

    #[test]
    fn test_misplaced_include() {
        let result = run("namespace N {\n#include <vector>\n}\n", "e.cp3");
        assert!(result.is_err(), "include inside namespace should fail: {:?}", result);
        assert_eq!(result.unwrap_err().to_string(), "misplaced include");
    }

    #[test]
    fn test_other_directives_are_rejected() {
        let result = run("#define X 1\nnamespace N {\n}\n", "e.cp3");
        assert!(result.is_err(), "define should fail: {:?}", result);
        assert_eq!(result.unwrap_err().kind(), ErrorKind::Syntax);
    }

    #[test]
    fn test_keyword_as_member_name() {
        let result = run("namespace N {\nclass A {\nint int;\n}\n}\n", "e.cp3");

        assert!(result.is_err(), "keyword name should fail: {:?}", result);
        assert_eq!(result.unwrap_err().to_string(), "invalid id: keyword chosen");
    }

    #[test]
    fn test_missing_closing_brace() {
        let result = run("namespace N {\nclass A {\n}\n", "e.cp3");

        assert!(result.is_err(), "open namespace should fail: {:?}", result);
        let error = result.unwrap_err();
        assert_eq!(error.kind(), ErrorKind::Syntax);
        assert!(error.to_string().contains("missing '}'"));
    }

    #[test]
    fn test_unterminated_body() {
        let result = run("namespace N {\nint f() {\nreturn 1;\n", "e.cp3");
        assert!(result.is_err(), "open body should fail: {:?}", result);
        assert_eq!(result.unwrap_err().kind(), ErrorKind::Syntax);
    }

    #[test]
    fn test_members_need_a_namespace() {
        let function = run("int f() {\n}\n", "e.cp3");
        assert!(function.is_err(), "top-level function should fail: {:?}", function);
        assert_eq!(
            function.unwrap_err().to_string(),
            "functions must be defined at least inside a namespace"
        );

        let constant = run("const int X = 1;\n", "e.cp3");
        assert!(constant.is_err(), "top-level constant should fail: {:?}", constant);
        assert_eq!(
            constant.unwrap_err().to_string(),
            "constants must be defined at least inside a namespace"
        );
    }

    #[test]
    fn test_class_needs_a_namespace() {
        let result = run("class A {\n}\n", "e.cp3");
        assert!(result.is_err(), "top-level class should fail: {:?}", result);
        assert_eq!(
            result.unwrap_err().to_string(),
            "misplaced class: namespace not yet defined"
        );
    }

    #[test]
    fn test_protected_namespace_member_is_rejected() {
        let result = run("namespace N {\nprotected:\n}\n", "e.cp3");
        assert!(result.is_err(), "protected in namespace should fail: {:?}", result);
        assert_eq!(result.unwrap_err().kind(), ErrorKind::Semantic);
    }

    #[test]
    fn test_translator_writes_into_any_stream() -> Result<()> {
        let mut translator = Translator::new(
            "namespace N {\nclass A {\nint x;\n}\n}\n",
            "dir/A.cp3",
            Vec::new(),
            Vec::new(),
            Strictness::High,
        )?;
        assert_eq!(translator.module().state(), ParseState::TopLevel);

        translator.process()?;
        let (header, implementation, module) = translator.into_outputs();

        assert!(String::from_utf8(header)?.contains("#line 3 \"A.cp3\"\nprivate: int x;\n"));
        assert_eq!(String::from_utf8(implementation)?, "#include \"A.h\"\n\n");

        let attribute = &module.members()[0];
        assert!(matches!(attribute.kind(), MemberKind::Attribute(_)));
        assert_eq!(module.qualified_name(attribute), "N::A::x");

        Ok(())
    }
}
