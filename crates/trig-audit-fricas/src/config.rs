// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Evaluator configuration and request templates.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use trig_audit_core::{Function, Sci};

/// How to start FriCAS and what to ask it.
///
/// `startup_lines` is tied to the banner printed by a particular FriCAS
/// version and the startup commands below; it is configuration, not
/// something the client can derive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FricasConfig {
    /// Program to run (looked up in `PATH`).
    pub program: String,
    /// Directory holding the compiled package that defines the request
    /// functions; loaded with `)lib )dir` when set.
    pub lib_dir: Option<PathBuf>,
    /// Working precision of `Float`, in bits.
    pub bits: u32,
    /// Significant digits in printed floats (`outputGeneral`).
    pub output_digits: u32,
    /// Banner lines to discard after startup.
    pub startup_lines: usize,
    /// Evaluator-side function names, per audited function.
    pub requests: RequestNames,
    /// Package qualifier appended as `$package`.
    pub package: String,
}

impl Default for FricasConfig {
    fn default() -> Self {
        Self {
            program: "fricas".to_owned(),
            lib_dir: None,
            bits: 32768,
            output_digits: 21,
            startup_lines: 17,
            requests: RequestNames::default(),
            package: "CNF".to_owned(),
        }
    }
}

impl FricasConfig {
    /// Commands passed with `-eval` at spawn time, in order.
    ///
    /// Output is switched off while the session is configured (history,
    /// prompts, type messages, precision, float layout) and back on at the
    /// end, so only the banner precedes the first reply.
    pub fn startup_commands(&self) -> Vec<String> {
        let mut cmds = vec![")set output algebra off".to_owned()];
        if let Some(dir) = &self.lib_dir {
            cmds.push(format!(")lib )dir {}", dir.display()));
        }
        cmds.extend([
            ")set history off".to_owned(),
            ")set messages prompt none".to_owned(),
            ")set messages type off".to_owned(),
            format!("bits({})$Float", self.bits),
            format!("outputGeneral({})$Float", self.output_digits),
            "outputSpacing(0)$Float".to_owned(),
            ")set output algebra on".to_owned(),
        ]);
        cmds
    }

    /// Request template for `function`.
    pub fn template(&self, function: Function) -> RequestTemplate {
        RequestTemplate {
            function: self.requests.name(function).to_owned(),
            package: self.package.clone(),
        }
    }
}

/// Evaluator-side names of the three reference functions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RequestNames {
    /// Sine.
    pub sin: String,
    /// Cosine.
    pub cos: String,
    /// One minus cosine.
    pub omc: String,
}

impl Default for RequestNames {
    fn default() -> Self {
        Self {
            sin: "cnf_sin".to_owned(),
            cos: "cnf_cos".to_owned(),
            omc: "cnf_1cs".to_owned(),
        }
    }
}

impl RequestNames {
    /// Name for `function`.
    pub fn name(&self, function: Function) -> &str {
        match function {
            Function::Sin => &self.sin,
            Function::Cos => &self.cos,
            Function::Omc => &self.omc,
        }
    }
}

/// One request line: `function(<x>)$package`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestTemplate {
    /// Function to call.
    pub function: String,
    /// Package qualifier.
    pub package: String,
}

impl RequestTemplate {
    /// Renders the request for `x`, newline included. The argument uses the
    /// `%27.20e` layout (21 significant digits).
    pub fn render(&self, x: f64) -> String {
        format!("{}({})${}\n", self.function, Sci::report(x), self.package)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_request_line() {
        let t = FricasConfig::default().template(Function::Omc);
        assert_eq!(t.render(0.5), "cnf_1cs( 5.00000000000000000000e-01)$CNF\n");
        assert_eq!(
            t.render(-3.3),
            "cnf_1cs(-3.29999999999999982236e+00)$CNF\n"
        );
    }

    #[test]
    fn startup_commands_configure_then_enable_output() {
        let mut config = FricasConfig::default();
        let cmds = config.startup_commands();
        assert_eq!(cmds.first().map(String::as_str), Some(")set output algebra off"));
        assert_eq!(cmds.last().map(String::as_str), Some(")set output algebra on"));
        assert!(cmds.contains(&"bits(32768)$Float".to_owned()));
        assert!(cmds.contains(&"outputGeneral(21)$Float".to_owned()));
        assert!(!cmds.iter().any(|c| c.starts_with(")lib")));

        config.lib_dir = Some(PathBuf::from("/opt/cnf"));
        assert_eq!(config.startup_commands()[1], ")lib )dir /opt/cnf");
    }
}
