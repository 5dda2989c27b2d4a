use crate::registry::Registry;

impl Registry {
    /// Render the usage text shown for `--help` and after parse errors.
    ///
    /// One `usage:`/`or:` line per usage string, then a tab-indented block
    /// per argument (aliases, description, required, type and count).
    pub fn usage(&self) -> String {
        let mut out = String::from("usage: ");
        if self.usages.is_empty() {
            out.push_str(&format!("{}\n", self.program_name));
        }
        for (idx, usage) in self.usages.iter().enumerate() {
            if idx > 0 {
                out.push_str("   or: ");
            }
            out.push_str(&format!("{} {}\n", self.program_name, usage));
        }

        for argument in self.arguments.values() {
            let def = &argument.definition;
            out.push_str(&format!("\t{}:\t{}\n", def.identifier, def.aliases.join(", ")));
            out.push_str(&format!("\t\t{}\n", def.description));
            out.push_str(&format!("\t\t\trequired: {}\n", def.required));
            out.push_str(&format!("\t\t\ttype:     {}\n", def.kind));
            out.push_str(&format!("\t\t\tcount:    {}\n", def.arity));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use crate::registry::Registry;
    use crate::value::ArgumentType;

    #[test]
    fn usage_lines_keep_insertion_order() {
        let r = Registry::new("prog", ["-c <count>", "--help"]);
        let text = r.usage();
        assert!(text.starts_with("usage: prog -c <count>\n   or: prog --help\n"));
    }

    #[test]
    fn usage_without_lines_names_the_program() {
        let r = Registry::new("prog", Vec::<String>::new());
        assert!(r.usage().starts_with("usage: prog\n\thelp:\t--help, -h\n"));
    }

    #[test]
    fn arguments_are_listed_with_metadata() {
        let mut r = Registry::new("prog", ["-c <count>"]);
        r.add("count", "Number of items", true, 1, ArgumentType::U64, ["--count", "-c"])
            .unwrap();
        let text = r.usage();
        let expected = "\tcount:\t--count, -c\n\
                        \t\tNumber of items\n\
                        \t\t\trequired: true\n\
                        \t\t\ttype:     u64\n\
                        \t\t\tcount:    1\n";
        assert!(text.ends_with(expected), "unexpected usage:\n{text}");
    }
}
