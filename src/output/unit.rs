// Mon Oct 19 2026 - Alex

use crate::output::naming::VTABLE_ENTRY_TYPE;
use crate::output::{ClassSource, EmitOptions, SourceWriter};
use itertools::Itertools;

const INCLUDES: &[&str] = &["stdbool.h", "stddef.h", "stdint.h", "stdio.h", "stdlib.h"];

/// Concatenates per-class output into one compilable C file. Classes must
/// be pushed base before derived.
#[derive(Debug, Clone, Default)]
pub struct TranslationUnit {
    classes: Vec<ClassSource>,
    main: Option<String>,
}

impl TranslationUnit {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, source: ClassSource) {
        self.classes.push(source);
    }

    pub fn set_main(&mut self, main: String) {
        self.main = Some(main);
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    /// Every emitted class, then any class only referenced by them. The
    /// latter stay incomplete types, which is enough for pointers.
    fn declared_types(&self) -> Vec<&str> {
        let emitted = self.classes.iter().map(|c| c.class_name.as_str());
        let referenced = self.classes.iter().flat_map(|c| c.references.iter().map(String::as_str));
        emitted.chain(referenced).unique().collect()
    }

    pub fn render(&self, options: &EmitOptions) -> String {
        let mut w = SourceWriter::new(options.indent_width);
        for header in INCLUDES {
            w.line(&format!("#include <{}>", header));
        }
        w.blank();
        w.line(&format!("typedef void (*{})(void);", VTABLE_ENTRY_TYPE));

        let declared = self.declared_types();
        if !declared.is_empty() {
            w.blank();
            for name in declared {
                w.line(&format!("typedef struct {0} {0};", name));
            }
        }
        for class in &self.classes {
            w.blank();
            w.raw(&class.struct_def);
        }

        let has_prototypes = self.classes.iter().any(|c| !c.prototypes.is_empty());
        if has_prototypes || self.main.is_some() {
            w.blank();
            if options.comments {
                w.line("// Prototypes");
            }
            for class in &self.classes {
                w.raw(&class.prototypes);
            }
            if self.main.is_some() {
                w.line("int main(void);");
            }
        }

        if self.classes.iter().any(|c| !c.asserts.is_empty()) {
            w.blank();
            for class in &self.classes {
                w.raw(&class.asserts);
            }
        }

        for class in self.classes.iter().filter(|c| !c.functions.is_empty()) {
            w.blank();
            if options.comments {
                w.line(&format!("// ---- {} ----", class.class_name));
                w.blank();
            }
            w.raw(class.functions.trim_end_matches('\n'));
            w.blank();
        }

        if let Some(main) = &self.main {
            w.blank();
            w.raw(main);
        }
        w.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn source(name: &str) -> ClassSource {
        ClassSource {
            class_name: name.to_string(),
            references: Vec::new(),
            struct_def: format!("struct {} {{\n    vfn_t* vtable;\n}};\n", name),
            prototypes: format!("{0}* create_{0}(void);\n", name),
            asserts: String::new(),
            functions: format!("{0}* create_{0}(void) {{\n    return NULL;\n}}\n\n", name),
        }
    }

    #[test]
    fn test_section_order() {
        let mut unit = TranslationUnit::new();
        unit.push(source("Object"));
        unit.push(source("User"));
        unit.set_main("int main(void) {\n    return 0;\n}\n".to_string());
        let text = unit.render(&EmitOptions::default());

        let position = |needle: &str| text.find(needle).unwrap();
        assert!(text.starts_with("#include <stdbool.h>\n"));
        assert!(position("#include <stdlib.h>") < position("typedef void (*vfn_t)(void);"));
        assert!(position("typedef void (*vfn_t)(void);") < position("typedef struct Object Object;"));
        assert!(position("typedef struct User User;") < position("struct Object {"));
        assert!(position("struct Object {") < position("struct User {"));
        assert!(position("struct User {") < position("Object* create_Object(void);"));
        assert!(position("int main(void);") < position("Object* create_Object(void) {"));
        assert!(position("User* create_User(void) {") < position("int main(void) {"));
        assert!(text.ends_with("    return 0;\n}\n"));
    }

    #[test]
    fn test_forward_declares_referenced_classes() {
        let mut holder = source("Holder");
        holder.references = vec!["Missing".to_string(), "Object".to_string()];
        let mut unit = TranslationUnit::new();
        unit.push(source("Object"));
        unit.push(holder);
        let text = unit.render(&EmitOptions::default());

        assert_eq!(text.matches("typedef struct Object Object;").count(), 1);
        assert!(text.contains("typedef struct Holder Holder;\ntypedef struct Missing Missing;\n"));
        assert!(!text.contains("struct Missing {"));
    }

    #[test]
    fn test_empty_unit_still_compiles() {
        let text = TranslationUnit::new().render(&EmitOptions::default());
        assert!(text.contains("typedef void (*vfn_t)(void);"));
        assert!(!text.contains("main"));
    }
}
