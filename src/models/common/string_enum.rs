//! 字符串枚举宏
//!
//! 数据库中枚举以 snake_case 字符串保存，API 中同样以字符串收发。

/// 生成枚举定义以及 `as_str`、`Display`、`FromStr`、`Deserialize`
///
/// 反序列化失败时给出全部可选值，便于前端提示。
macro_rules! string_enum {
    (
        $(#[$meta:meta])*
        $name:ident ($label:tt) {
            $($variant:ident => $value:tt),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
        pub enum $name {
            $(
                #[serde(rename = $value)]
                $variant,
            )+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $value,)+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $name {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($value => Ok($name::$variant),)+
                    _ => Err(format!("Invalid {}: '{}'", $label, s)),
                }
            }
        }

        impl<'de> serde::Deserialize<'de> for $name {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: serde::Deserializer<'de>,
            {
                let s = String::deserialize(deserializer)?;
                s.parse::<$name>().map_err(|_| {
                    let allowed: Vec<&str> = $name::ALL.iter().map(|v| v.as_str()).collect();
                    serde::de::Error::custom(format!(
                        "invalid {}: '{}'. allowed values: {}",
                        $label,
                        s,
                        allowed.join(", ")
                    ))
                })
            }
        }
    };
}

pub(crate) use string_enum;
