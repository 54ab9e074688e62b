use serde::Serialize;
use strum::AsRefStr;

/// Type of the icon.
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IconType {
    #[default]
    /// [`Icon::data`] is a [`BuiltinIcon`] variant.
    Builtin,
}

/// An icon representation.
#[derive(Serialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct Icon {
    /// String content representing the icon data.
    ///
    /// See [`IconType`] for the meaning of the data.
    pub data: String,
    /// The type of the icon, indicating how the `data` field should be interpreted.
    pub r#type: IconType,
}

impl Icon {
    /// Creates a new icon with the given data and type.
    #[inline]
    pub fn new(data: impl Into<String>, r#type: IconType) -> Self {
        Self {
            data: data.into(),
            r#type,
        }
    }

    /// Creates a new icon with the given data and type set to [`IconType::Builtin`].
    #[inline]
    pub fn builtin(data: impl Into<String>) -> Self {
        Self::new(data, IconType::Builtin)
    }
}

#[derive(AsRefStr, Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuiltinIcon {
    Card,
    Error,
}

impl BuiltinIcon {
    /// Returns the icon corresponding to the given builtin icon type.
    pub fn icon(&self) -> Icon {
        Icon::builtin(self.as_ref())
    }
}

impl From<BuiltinIcon> for Icon {
    fn from(value: BuiltinIcon) -> Self {
        value.icon()
    }
}
