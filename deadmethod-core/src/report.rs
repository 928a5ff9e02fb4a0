//! Output formatting.

use std::io::{self, Write};

use crate::detect::Finding;

/// Writes findings in plain text format.
pub fn write_plain<W: Write>(out: &mut W, findings: &[Finding]) -> io::Result<()> {
    if findings.is_empty() {
        writeln!(out, "No unused methods found.")?;
    } else {
        writeln!(out, "Potentially unused methods:")?;
        for finding in findings {
            writeln!(out, "- {}", finding)?;
        }
    }
    Ok(())
}

/// Prints findings to stdout in plain text format.
pub fn print_plain(findings: &[Finding]) -> io::Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    write_plain(&mut out, findings)?;
    out.flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn render(findings: &[Finding]) -> String {
        let mut buf = Vec::new();
        write_plain(&mut buf, findings).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_empty_report() {
        assert_eq!(render(&[]), "No unused methods found.\n");
    }

    #[test]
    fn test_findings_in_order() {
        let findings = vec![
            Finding {
                class_name: "Foo".to_string(),
                method_name: "bar".to_string(),
                file: PathBuf::from("/p/src/foo.ts"),
                line: 2,
            },
            Finding {
                class_name: "Foo".to_string(),
                method_name: "qux".to_string(),
                file: PathBuf::from("/p/src/foo.ts"),
                line: 7,
            },
        ];

        assert_eq!(
            render(&findings),
            "Potentially unused methods:\n- Foo.bar in /p/src/foo.ts:2\n- Foo.qux in /p/src/foo.ts:7\n"
        );
    }
}
