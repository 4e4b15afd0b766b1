//! Shell and Terraform output for a resolved profile.
//!
//! Values are written between double quotes without escaping, so a secret that contains
//! `"` or `$` will not survive `eval` intact.

use crate::error::EnvawsError;
use crate::profile::{Section, ACCESS_KEY_ID, REGION, SECRET_ACCESS_KEY};
use std::fmt;
use std::str::FromStr;

/// Terraform variable styles accepted by `tf --format`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TfFormat {
    /// `TF_VAR_*` assignments on one line, for prefixing a command.
    Env,
    /// A `.tfvars` body.
    Var,
    /// `-var` flags for the terraform command line.
    Flags,
    /// `export TF_VAR_*` statements.
    Export,
}

impl TfFormat {
    pub const ALL: [TfFormat; 4] = [TfFormat::Env, TfFormat::Var, TfFormat::Flags, TfFormat::Export];

    pub fn name(self) -> &'static str {
        match self {
            TfFormat::Env => "env",
            TfFormat::Var => "var",
            TfFormat::Flags => "option",
            TfFormat::Export => "export",
        }
    }
}

impl FromStr for TfFormat {
    type Err = EnvawsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TfFormat::ALL
            .into_iter()
            .find(|format| format.name() == s)
            .ok_or_else(|| EnvawsError::UnsupportedFormat(s.to_string()))
    }
}

impl fmt::Display for TfFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// What to render a profile as.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    Env,
    Tf(TfFormat),
}

/// One output layout: each variable becomes `{prefix}{name}{assign}"{value}"`,
/// joined by `separator`. The region entry is dropped when the region is empty.
struct Template {
    prefix: &'static str,
    assign: &'static str,
    separator: &'static str,
    access_key: &'static str,
    secret_key: &'static str,
    region: &'static str,
}

const ENV: Template = Template {
    prefix: "export ",
    assign: "=",
    separator: "\n",
    access_key: "AWS_ACCESS_KEY_ID",
    secret_key: "AWS_SECRET_ACCESS_KEY",
    region: "AWS_DEFAULT_REGION",
};

const TF_ENV: Template = Template {
    prefix: "",
    assign: "=",
    separator: " ",
    access_key: "TF_VAR_aws_access_key",
    secret_key: "TF_VAR_aws_secret_key",
    region: "TF_VAR_region",
};

const TF_VAR: Template = Template {
    prefix: "",
    assign: " = ",
    separator: "\n",
    access_key: "aws_access_key",
    secret_key: "aws_secret_key",
    region: "aws_region",
};

const TF_OPTION: Template = Template {
    prefix: "-var ",
    assign: "=",
    separator: " ",
    access_key: "aws_access_key",
    secret_key: "aws_secret_key",
    region: "region",
};

const TF_EXPORT: Template = Template {
    prefix: "export ",
    assign: "=",
    separator: "\n",
    access_key: "TF_VAR_aws_access_key",
    secret_key: "TF_VAR_aws_secret_key",
    region: "TF_VAR_region",
};

const UNSET_VARS: [&str; 4] = [
    "AWS_ACCESS_KEY_ID",
    "AWS_SECRET_ACCESS_KEY",
    "AWS_SECURITY_TOKEN",
    "AWS_DEFAULT_PROFILE",
];

impl Kind {
    fn template(self) -> &'static Template {
        match self {
            Kind::Env => &ENV,
            Kind::Tf(TfFormat::Env) => &TF_ENV,
            Kind::Tf(TfFormat::Var) => &TF_VAR,
            Kind::Tf(TfFormat::Flags) => &TF_OPTION,
            Kind::Tf(TfFormat::Export) => &TF_EXPORT,
        }
    }
}

impl Template {
    fn assignment(&self, name: &str, value: &str) -> String {
        format!("{}{}{}\"{}\"", self.prefix, name, self.assign, value)
    }

    fn render(&self, access_key: &str, secret_key: &str, region: &str) -> String {
        let mut parts = vec![
            self.assignment(self.access_key, access_key),
            self.assignment(self.secret_key, secret_key),
        ];
        if !region.is_empty() {
            parts.push(self.assignment(self.region, region));
        }
        parts.join(self.separator)
    }
}

fn value<'a>(section: &'a Section, key: &str) -> &'a str {
    section.get(key).map_or("", String::as_str)
}

/// Renders `section` as `kind`, trimmed and terminated by a single newline.
pub fn render(section: &Section, kind: Kind) -> String {
    let text = kind.template().render(
        value(section, ACCESS_KEY_ID),
        value(section, SECRET_ACCESS_KEY),
        value(section, REGION),
    );
    format!("{}\n", text.trim())
}

/// Statements that clear the variables `env` sets.
pub fn render_unset() -> String {
    let lines: Vec<String> = UNSET_VARS.iter().map(|var| format!("unset {var}")).collect();
    format!("{}\n", lines.join("\n"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(region: Option<&str>) -> Section {
        let mut section = Section::new();
        section.insert(ACCESS_KEY_ID.to_string(), "AKIA1".to_string());
        section.insert(SECRET_ACCESS_KEY.to_string(), "SECRET1".to_string());
        if let Some(region) = region {
            section.insert(REGION.to_string(), region.to_string());
        }
        section
    }

    #[test]
    fn test_env_without_region() {
        assert_eq!(
            render(&profile(None), Kind::Env),
            "export AWS_ACCESS_KEY_ID=\"AKIA1\"\nexport AWS_SECRET_ACCESS_KEY=\"SECRET1\"\n"
        );
    }

    #[test]
    fn test_env_with_region() {
        assert_eq!(
            render(&profile(Some("us-east-1")), Kind::Env),
            "export AWS_ACCESS_KEY_ID=\"AKIA1\"\n\
             export AWS_SECRET_ACCESS_KEY=\"SECRET1\"\n\
             export AWS_DEFAULT_REGION=\"us-east-1\"\n"
        );
    }

    #[test]
    fn test_empty_region_is_omitted() {
        assert_eq!(render(&profile(Some("")), Kind::Env), render(&profile(None), Kind::Env));
    }

    #[test]
    fn test_tf_env() {
        assert_eq!(
            render(&profile(None), Kind::Tf(TfFormat::Env)),
            "TF_VAR_aws_access_key=\"AKIA1\" TF_VAR_aws_secret_key=\"SECRET1\"\n"
        );
        assert_eq!(
            render(&profile(Some("ap-northeast-1")), Kind::Tf(TfFormat::Env)),
            "TF_VAR_aws_access_key=\"AKIA1\" TF_VAR_aws_secret_key=\"SECRET1\" TF_VAR_region=\"ap-northeast-1\"\n"
        );
    }

    #[test]
    fn test_tf_var() {
        assert_eq!(
            render(&profile(Some("us-west-2")), Kind::Tf(TfFormat::Var)),
            "aws_access_key = \"AKIA1\"\naws_secret_key = \"SECRET1\"\naws_region = \"us-west-2\"\n"
        );
        assert_eq!(
            render(&profile(None), Kind::Tf(TfFormat::Var)),
            "aws_access_key = \"AKIA1\"\naws_secret_key = \"SECRET1\"\n"
        );
    }

    #[test]
    fn test_tf_option() {
        assert_eq!(
            render(&profile(Some("us-west-2")), Kind::Tf(TfFormat::Flags)),
            "-var aws_access_key=\"AKIA1\" -var aws_secret_key=\"SECRET1\" -var region=\"us-west-2\"\n"
        );
    }

    #[test]
    fn test_tf_export() {
        assert_eq!(
            render(&profile(None), Kind::Tf(TfFormat::Export)),
            "export TF_VAR_aws_access_key=\"AKIA1\"\nexport TF_VAR_aws_secret_key=\"SECRET1\"\n"
        );
    }

    #[test]
    fn test_render_is_deterministic() {
        let section = profile(Some("eu-central-1"));
        for format in TfFormat::ALL {
            assert_eq!(render(&section, Kind::Tf(format)), render(&section, Kind::Tf(format)));
        }
    }

    #[test]
    fn test_format_names_round_trip() {
        for format in TfFormat::ALL {
            assert_eq!(format.name().parse::<TfFormat>().unwrap(), format);
        }
    }

    #[test]
    fn test_unknown_format_rejected() {
        let err = "bogus".parse::<TfFormat>().unwrap_err();
        assert_eq!(err.to_string(), "not supported format: bogus");
    }

    #[test]
    fn test_unset() {
        assert_eq!(
            render_unset(),
            "unset AWS_ACCESS_KEY_ID\nunset AWS_SECRET_ACCESS_KEY\nunset AWS_SECURITY_TOKEN\nunset AWS_DEFAULT_PROFILE\n"
        );
    }
}
