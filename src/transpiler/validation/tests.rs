#[cfg(test)]
mod tests {
    use crate::config::Config;
    use crate::model::keywords::{Modifier, NativeType, Storage, TypeRef, Visibility};
    use crate::model::{EntryPoint, Member, Module, Strictness};
    use crate::transpiler::validation::{check_entry_point, check_member, check_module};
    use crate::transpiler::{translate, ErrorKind};
    use anyhow::Result;

    fn at(strictness: Strictness) -> Config {
        Config {
            strictness,
            ..Config::default()
        }
    }

    fn int() -> TypeRef {
        TypeRef::Native(NativeType::Int)
    }

    const MIXED: &str = "namespace N {\nint f() {\n}\nclass A {\n}\n}\n";

    #[test]
    fn test_functions_and_classes_pass_only_at_low() -> Result<()> {
        translate(MIXED, "mixed.cp3", &at(Strictness::Low))?;

        for strictness in [Strictness::Medium, Strictness::High] {
            let result = translate(MIXED, "mixed.cp3", &at(strictness));
            assert!(result.is_err(), "{} should reject the mix: {:?}", strictness, result);

            let error = result.unwrap_err();
            assert_eq!(error.kind(), ErrorKind::Strictness);
            assert!(error.is_semantic());
            assert_eq!(
                error.to_string(),
                "functions and classes cannot share the same namespace"
            );
        }

        Ok(())
    }

    #[test]
    fn test_two_classes_fail_only_at_high() -> Result<()> {
        let source = "namespace N {\nclass A {\n}\nclass B {\n}\n}\n";

        translate(source, "two.cp3", &at(Strictness::Medium))?;

        let result = translate(source, "two.cp3", &at(Strictness::High));
        assert!(result.is_err(), "high strictness allows one class: {:?}", result);
        assert_eq!(
            result.unwrap_err().to_string(),
            "no more than one class allowed per namespace"
        );

        Ok(())
    }

    #[test]
    fn test_sibling_namespaces_fail_from_medium() -> Result<()> {
        let source = "namespace Outer {\nnamespace A {\n}\nnamespace B {\n}\n}\n";

        translate(source, "ns.cp3", &at(Strictness::Low))?;

        let result = translate(source, "ns.cp3", &at(Strictness::Medium));
        assert!(result.is_err(), "medium allows one inner namespace: {:?}", result);
        assert_eq!(result.unwrap_err().kind(), ErrorKind::Strictness);

        Ok(())
    }

    #[test]
    fn test_outer_namespaces_must_be_empty_at_high() -> Result<()> {
        let source = "namespace Outer {\nconst int X = 1;\nnamespace Inner {\n}\n}\n";

        translate(source, "outer.cp3", &at(Strictness::Medium))?;

        let result = translate(source, "outer.cp3", &at(Strictness::High));
        assert!(result.is_err(), "content beside a namespace: {:?}", result);
        assert_eq!(
            result.unwrap_err().to_string(),
            "outer namespaces must be empty: Outer"
        );

        Ok(())
    }

    #[test]
    fn test_namespace_and_class_side_by_side_fail_at_high() {
        let source = "namespace N {\nclass A {\n}\nnamespace M {\n}\n}\n";
        let result = translate(source, "side.cp3", &at(Strictness::High));

        assert!(result.is_err(), "class beside a namespace: {:?}", result);
        assert_eq!(
            result.unwrap_err().to_string(),
            "one namespace can only hold another namespace or a class"
        );
    }

    #[test]
    fn test_single_chain_passes_at_high() -> Result<()> {
        let source = "namespace Company {\n\
                      namespace Geometry {\n\
                      class Point {\n\
                      public:\n\
                      int getX() const {\n\
                      return 0;\n\
                      }\n\
                      }\n\
                      }\n\
                      }\n";

        let translation = translate(source, "point.cp3", &at(Strictness::High))?;
        assert!(translation.header.contains("namespace Geometry {"));
        Ok(())
    }

    #[test]
    fn test_empty_module_is_a_strictness_error() {
        for strictness in [Strictness::Low, Strictness::Medium, Strictness::High] {
            let result = translate("// nothing here\n", "empty.cp3", &at(strictness));
            assert!(result.is_err(), "empty module at {}: {:?}", strictness, result);

            let error = result.unwrap_err();
            assert_eq!(error.kind(), ErrorKind::Strictness);
            assert_eq!(error.to_string(), "empty module?");
        }
    }

    #[test]
    fn test_module_check_runs_on_the_model() -> Result<()> {
        let mut module = Module::new("m");
        module.open_namespace("N")?;
        module.close();

        check_module(&module, Strictness::High)?;
        Ok(())
    }

    #[test]
    fn test_namespace_function_storage() -> Result<()> {
        let mut module = Module::new("m");
        let ns = module.open_namespace("N")?;

        let mut function = Member::function(1, "f", int());
        function.set_storage(Some(Storage::Volatile));
        let id = module.add_member(ns, function);

        let result = check_member(&module, module.member(id), Strictness::Low);
        assert!(result.is_err(), "volatile function: {:?}", result);
        assert_eq!(result.unwrap_err().kind(), ErrorKind::Semantic);

        let mut function = Member::function(2, "g", int());
        function.set_storage(Some(Storage::Static));
        let id = module.add_member(ns, function);
        check_member(&module, module.member(id), Strictness::Low)?;

        Ok(())
    }

    #[test]
    fn test_private_inline_namespace_member() -> Result<()> {
        let mut module = Module::new("m");
        let ns = module.open_namespace("N")?;

        let mut function = Member::function(1, "f", int());
        function.set_storage(Some(Storage::Inline));
        function.set_visibility(Visibility::Private);
        let id = module.add_member(ns, function);

        let result = check_member(&module, module.member(id), Strictness::Medium);
        assert!(result.is_err(), "private inline function: {:?}", result);
        assert!(result.unwrap_err().to_string().contains("inline"));

        Ok(())
    }

    #[test]
    fn test_constant_needs_an_initial_value() -> Result<()> {
        let mut module = Module::new("m");
        let ns = module.open_namespace("N")?;

        let mut constant = Member::constant(1, "X", int());
        constant.set_modifiers(vec![Modifier::Const]);
        let id = module.add_member(ns, constant);

        let result = check_member(&module, module.member(id), Strictness::Medium);
        assert!(result.is_err(), "constant without value: {:?}", result);
        assert_eq!(
            result.unwrap_err().to_string(),
            "X constant should have an initial value"
        );

        Ok(())
    }

    #[test]
    fn test_class_members_outside_a_class() -> Result<()> {
        let mut module = Module::new("m");
        let ns = module.open_namespace("N")?;
        let id = module.add_member(ns, Member::attribute(1, "x", int()));

        let result = check_member(&module, module.member(id), Strictness::Medium);
        assert!(result.is_err(), "attribute in a namespace: {:?}", result);
        assert_eq!(result.unwrap_err().kind(), ErrorKind::Semantic);

        Ok(())
    }

    #[test]
    fn test_virtual_constructor_is_rejected() -> Result<()> {
        let mut module = Module::new("m");
        module.open_namespace("N")?;
        let class = module.open_class("A", Vec::new())?;

        let mut constructor = Member::method(1, "A", TypeRef::default());
        constructor.set_modifiers(vec![Modifier::Virtual]);
        let id = module.add_member(class, constructor);

        let result = check_member(&module, module.member(id), Strictness::Medium);
        assert!(result.is_err(), "virtual constructor: {:?}", result);
        assert_eq!(result.unwrap_err().to_string(), "constructors cannot be virtual");

        Ok(())
    }

    #[test]
    fn test_inline_pure_virtual_is_rejected() -> Result<()> {
        let mut module = Module::new("m");
        module.open_namespace("N")?;
        let class = module.open_class("A", Vec::new())?;

        let mut method = Member::method(1, "run", TypeRef::default());
        method.set_storage(Some(Storage::Inline));
        method.set_pure_virtual()?;
        let id = module.add_member(class, method);

        let result = check_member(&module, module.member(id), Strictness::Medium);
        assert!(result.is_err(), "inline pure virtual: {:?}", result);
        assert_eq!(
            result.unwrap_err().to_string(),
            "inline functions cannot be pure virtual"
        );

        Ok(())
    }

    #[test]
    fn test_entry_point_storage() -> Result<()> {
        let module = Module::new("m");

        let plain = EntryPoint::new(1);
        check_entry_point(&module, &plain, Strictness::High)?;

        let mut inline = EntryPoint::new(1);
        inline.function_mut().set_storage(Some(Storage::Inline));
        let result = check_entry_point(&module, &inline, Strictness::Low);
        assert!(result.is_err(), "inline main: {:?}", result);
        assert_eq!(
            result.unwrap_err().to_string(),
            "main function should not be either static or inline"
        );

        let mut friend = EntryPoint::new(1);
        friend.function_mut().set_storage(Some(Storage::Friend));
        let result = check_entry_point(&module, &friend, Strictness::Low);
        assert!(result.is_err(), "friend main: {:?}", result);
        assert_eq!(result.unwrap_err().kind(), ErrorKind::Semantic);

        Ok(())
    }
}
