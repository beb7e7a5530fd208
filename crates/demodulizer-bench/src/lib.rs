#![deny(clippy::all)]
#![warn(clippy::pedantic)]

//! Benchmark harness for demodulizer.
//!
//! Run benchmarks with: `cargo bench -p demodulizer-bench`

use std::fmt::Write;

/// A synthetic component module with `imports` dependencies and `exports`
/// exported bindings, padded with plain code between them.
#[must_use]
pub fn synthetic_module(imports: usize, exports: usize) -> String {
    let mut src = String::new();
    for i in 0..imports {
        match i % 4 {
            0 => {
                let _ = writeln!(src, "import dep{i} from 'pkg-{i}';");
            }
            1 => {
                let _ = writeln!(src, "import {{ a as a{i}, b as b{i} }} from './local-{i}.js';");
            }
            2 => {
                let _ = writeln!(src, "import * as ns{i} from '../shared/mod-{i}.js';");
            }
            _ => {
                let _ = writeln!(src, "export * from './reexport-{i}.js';");
            }
        }
    }
    for i in 0..exports {
        let _ = writeln!(
            src,
            "// helper {i}\nexport function helper{i}(x) {{\n  const y = x * {i};\n  return y + 1;\n}}"
        );
        let _ = writeln!(src, "export const value{i} = helper{i}({i});");
    }
    src.push_str("export default function main() { return 0; }\n");
    src
}

#[cfg(test)]
mod tests {
    use super::*;
    use demodulizer_core::{ModuleKey, Transpiler};

    #[test]
    fn test_synthetic_module_transpiles() {
        for (imports, exports) in [(8, 4), (32, 32), (128, 256)] {
            let src = synthetic_module(imports, exports);
            let out = Transpiler::default()
                .transpile(&ModuleKey::new("app/src/app.js"), &src)
                .unwrap();
            assert_eq!(out.directives.len(), imports);
        }
    }
}
