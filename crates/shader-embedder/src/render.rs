//! Rendering of the generated header.

use core::fmt;
use std::path::Path;

use crate::{discover::ShaderSource, identifier::escape_line};

/// Warning at the top of every generated header.
const HEADER: &str = "/* GENERATED FILE - DO NOT EDIT!
 * Created by build-assets embed-shaders.
 *
 */
";

/// Declares a shader's variable, followed by its source lines.
const DECLARATION: &str = "const char*";

/// Name of the filename to source lookup table.
const MAP_VARIABLE: &str = "g_shaderMap";

/// Name of the function filling in [`MAP_VARIABLE`].
const INIT_FUNCTION: &str = "initShaderList";

/// Indentation of source lines and map insertions.
const TAB: &str = "    ";

/// What to do with empty lines of a shader source.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum BlankLines {
    /// Leave them out of the embedded source, as headers generated so far always did.
    #[default]
    Skip,
    /// Embed them as `"\n"`.
    Keep,
}

/// Renders the header declaring every shader and the lookup table into `out`.
///
/// # Errors
///
/// Fails only if `out` does.
#[inline]
pub fn render<W>(out: &mut W, shaders: &[ShaderSource], blank_lines: BlankLines) -> fmt::Result
where
    W: fmt::Write,
{
    writeln!(out, "{HEADER}")?;
    writeln!(out, "#include <map>")?;
    writeln!(out, "#include <string>")?;

    for shader in shaders {
        writeln!(out, "\n{DECLARATION} {} = ", shader.identifier)?;
        for line in &shader.lines {
            if line.is_empty() && blank_lines == BlankLines::Skip {
                continue;
            }
            writeln!(out, "{TAB}\"{}\\n\"", escape_line(line))?;
        }
        writeln!(out, ";")?;
    }

    writeln!(out, "\n\nstd::map<std::string, std::string> {MAP_VARIABLE};")?;
    writeln!(out, "\n")?;

    writeln!(out, "void {INIT_FUNCTION}() {{")?;
    for shader in shaders {
        let file_name = escape_line(&shader.file_name);
        let identifier = &shader.identifier;
        writeln!(out, "{TAB}{MAP_VARIABLE}[\"{file_name}\"] = {identifier};")?;
    }
    writeln!(out, "}}")
}

/// Renders the placeholder written when `shader_dir` does not exist.
#[inline]
#[must_use]
pub fn render_missing(shader_dir: &Path) -> String {
    format!("/* Directory {} does not exist. */\n", shader_dir.display())
}

#[cfg(test)]
mod test {
    use super::*;

    fn rendered(shaders: &[ShaderSource], blank_lines: BlankLines) -> String {
        let mut out = String::new();
        render(&mut out, shaders, blank_lines).unwrap();
        out
    }

    fn shaders() -> Vec<ShaderSource> {
        vec![
            ShaderSource::new("a.vert", "void main(){}\n\n").unwrap(),
            ShaderSource::new("b.frag", "foo\n").unwrap(),
        ]
    }

    #[test_log::test]
    fn full_document() {
        let expected = [
            "/* GENERATED FILE - DO NOT EDIT!",
            " * Created by build-assets embed-shaders.",
            " *",
            " */",
            "",
            "#include <map>",
            "#include <string>",
            "",
            "const char* a_vert = ",
            "    \"void main(){}\\n\"",
            ";",
            "",
            "const char* b_frag = ",
            "    \"foo\\n\"",
            ";",
            "",
            "",
            "std::map<std::string, std::string> g_shaderMap;",
            "",
            "",
            "void initShaderList() {",
            "    g_shaderMap[\"a.vert\"] = a_vert;",
            "    g_shaderMap[\"b.frag\"] = b_frag;",
            "}",
            "",
        ]
        .join("\n");

        assert_eq!(rendered(&shaders(), BlankLines::Skip), expected);
    }

    #[test_log::test]
    fn keeps_blank_lines_on_request() {
        let header = rendered(&shaders(), BlankLines::Keep);
        assert!(header.contains("    \"void main(){}\\n\"\n    \"\\n\"\n;\n"));
    }

    #[test_log::test]
    fn no_shaders_gives_empty_map() {
        let header = rendered(&[], BlankLines::Skip);
        assert!(!header.contains(DECLARATION));
        assert!(header.ends_with("void initShaderList() {\n}\n"));
    }

    #[test_log::test]
    fn classic_mac_line_endings_stay_in_literals() {
        let shader =
            ShaderSource::new("mac.frag", "void main(){\rgl_FragColor = c;\r}\r").unwrap();

        let header = rendered(&[shader], BlankLines::Skip);

        assert!(!header.contains('\r'));
        assert!(header.contains(
            "const char* mac_frag = \n    \"void main(){\\n\"\n    \"gl_FragColor = c;\\n\"\n    \"}\\n\"\n;\n"
        ));
    }

    #[test_log::test]
    fn missing_directory_comment() {
        assert_eq!(
            render_missing(Path::new("shaders/")),
            "/* Directory shaders/ does not exist. */\n"
        );
    }
}
