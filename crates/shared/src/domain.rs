use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

/// Closed option set rendered as a combo box. `value` is what gets recorded,
/// `label` is what the form shows.
pub trait FormOption: Copy + Eq + 'static {
    const ALL: &'static [Self];

    fn value(self) -> &'static str;

    fn label(self) -> &'static str;

    fn from_value(value: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|option| option.value() == value)
    }
}

macro_rules! option_set {
    ($name:ident { $($variant:ident => ($value:literal, $label:literal)),+ $(,)? }) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $($variant,)+
        }

        impl FormOption for $name {
            const ALL: &'static [Self] = &[$(Self::$variant),+];

            fn value(self) -> &'static str {
                match self {
                    $(Self::$variant => $value,)+
                }
            }

            fn label(self) -> &'static str {
                match self {
                    $(Self::$variant => $label,)+
                }
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(self.value())
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let raw = String::deserialize(deserializer)?;
                Self::from_value(&raw).ok_or_else(|| {
                    de::Error::custom(format!(
                        "unknown {} value '{raw}'",
                        stringify!($name)
                    ))
                })
            }
        }
    };
}

option_set!(SellerCode {
    Df => ("338200", "DF - 338200"),
    Jp => ("337654", "JP - 337654"),
    Fn => ("994332", "FN - 994332"),
});

option_set!(ClientCode {
    C1 => ("3343222", "C1 - 3343222"),
    C2 => ("7856654", "C2 - 7856654"),
    C3 => ("0909494", "C3 - 0909494"),
});

option_set!(Brand {
    Marca1 => ("Marca1", "Marca-1"),
    Marca2 => ("Marca2", "Marca-2"),
    Marca3 => ("Marca3", "Marca-3"),
});

// Activity values reuse the brand identifiers; only the labels differ.
option_set!(Activity {
    Actividad1 => ("Marca1", "Actividad-1"),
    Actividad2 => ("Marca2", "Actividad-2"),
    Actividad3 => ("Marca3", "Actividad-3"),
});
