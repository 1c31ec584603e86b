//! Macros for reducing boilerplate when defining console records
//!
//! These macros generate the repetitive trait implementations needed for
//! each record type: the typed struct, its partial `…Patch` companion and
//! the [`Record`](crate::core::entity::Record) /
//! [`Patch`](crate::core::entity::Patch) implementations the engine works with.

/// Closed enumerated domain of a categorical attribute
///
/// Each variant maps to the label shown to operators and matched by
/// categorical filters. Exactly one variant must be marked `#[default]`.
///
/// # Example
/// ```rust
/// use backstage::categorical_enum;
///
/// categorical_enum! {
///     pub enum Mood {
///         #[default]
///         Calm => "calm",
///         Energetic => "energetic",
///     }
/// }
///
/// assert_eq!(Mood::Energetic.as_str(), "energetic");
/// assert_eq!("calm".parse::<Mood>().unwrap(), Mood::Calm);
/// assert_eq!(Mood::ALL.len(), 2);
/// ```
#[macro_export]
macro_rules! categorical_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident => $label:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default,
            ::serde::Serialize, ::serde::Deserialize,
        )]
        $vis enum $name {
            $( $(#[$vmeta])* #[serde(rename = $label)] $variant ),+
        }

        impl $name {
            /// Every value of the domain, in declaration order
            pub const ALL: &'static [$name] = &[ $( $name::$variant ),+ ];

            /// Label of this value
            pub fn as_str(&self) -> &'static str {
                match self {
                    $( $name::$variant => $label ),+
                }
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl ::std::str::FromStr for $name {
            type Err = $crate::core::error::ValidationError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                $( if s == $label { return Ok($name::$variant); } )+
                Err($crate::core::error::ValidationError::UnknownValue {
                    domain: stringify!($name).to_string(),
                    value: s.to_string(),
                })
            }
        }

        impl From<$name> for $crate::core::field::FieldValue {
            fn from(value: $name) -> Self {
                $crate::core::field::FieldValue::String(value.as_str().to_string())
            }
        }
    };
}

/// Complete macro to declare a console record with automatic trait implementations
///
/// Generates:
/// - the record struct with `id`, `created_at`, `updated_at` and the listed fields
/// - the patch struct, every field optional, with one builder method per field
/// - `Record` for the struct and `Patch` for the patch
///
/// Every field type must implement `Default`, `Clone` and
/// `Into<FieldValue>`; fields absent from a create draft take their default.
///
/// # Example
///
/// ```rust,ignore
/// define_record!(
///     Album, AlbumPatch, "album",
///     id: i64,
///     {
///         title: String,
///         genre: MusicGenre,
///         release_date: NaiveDate,
///     },
///     searchable: ["title"],
///     categorical: ["genre"],
///     required: ["title", "genre"],
///     date_field: "release_date",
///     rules: [FieldRule::new("title").max_length(120)],
///     tabs: album_tabs,
/// );
///
/// let draft = AlbumPatch::default().title("Kind of Blue").genre(MusicGenre::Jazz);
/// ```
#[macro_export]
macro_rules! define_record {
    (
        $name:ident, $patch:ident, $type_name:literal,
        id: $id:ty,
        {
            $( $(#[$fmeta:meta])* $field:ident : $fty:ty ),* $(,)?
        },
        searchable: [ $( $searchable:literal ),* $(,)? ],
        categorical: [ $( $categorical:literal ),* $(,)? ],
        required: [ $( $required:literal ),* $(,)? ],
        $( date_field: $date_field:literal, )?
        $( rules: [ $( $rule:expr ),* $(,)? ], )?
        tabs: $tabs:path $(,)?
    ) => {
        #[derive(Debug, Clone, PartialEq, ::serde::Serialize, ::serde::Deserialize)]
        pub struct $name {
            /// Identity, unique within the collection
            pub id: $id,

            /// When this record was created
            pub created_at: ::chrono::DateTime<::chrono::Utc>,

            /// When this record was last updated
            pub updated_at: ::chrono::DateTime<::chrono::Utc>,
            $( $(#[$fmeta])* pub $field : $fty ),*
        }

        /// Partial record: create payload and update patch
        #[derive(Debug, Clone, Default, PartialEq, ::serde::Serialize, ::serde::Deserialize)]
        pub struct $patch {
            $(
                #[serde(default, skip_serializing_if = "Option::is_none")]
                pub $field : Option<$fty>,
            )*
        }

        impl $patch {
            $(
                pub fn $field(mut self, value: impl Into<$fty>) -> Self {
                    self.$field = Some(value.into());
                    self
                }
            )*

            /// Patch carrying every field of `record`, e.g. to prefill an edit form
            pub fn from_record(record: &$name) -> Self {
                Self {
                    $( $field: Some(record.$field.clone()), )*
                }
            }
        }

        impl $crate::core::entity::Patch<$name> for $patch {
            fn is_empty(&self) -> bool {
                true $( && self.$field.is_none() )*
            }

            fn field_value(&self, field: &str) -> Option<$crate::core::field::FieldValue> {
                $(
                    if field == stringify!($field) {
                        return self.$field.clone().map(Into::into);
                    }
                )*
                None
            }

            fn apply_to(self, record: &mut $name) {
                $(
                    if let Some(value) = self.$field {
                        record.$field = value;
                    }
                )*
            }
        }

        impl $crate::core::entity::Record for $name {
            type Id = $id;
            type Patch = $patch;

            fn entity_type() -> &'static str {
                $type_name
            }

            fn id(&self) -> &Self::Id {
                &self.id
            }

            fn created_at(&self) -> ::chrono::DateTime<::chrono::Utc> {
                self.created_at
            }

            fn updated_at(&self) -> ::chrono::DateTime<::chrono::Utc> {
                self.updated_at
            }

            fn field_value(&self, field: &str) -> Option<$crate::core::field::FieldValue> {
                match field {
                    "id" => return Some(self.id.clone().into()),
                    "created_at" => return Some(self.created_at.into()),
                    "updated_at" => return Some(self.updated_at.into()),
                    _ => {}
                }
                $(
                    if field == stringify!($field) {
                        return Some(self.$field.clone().into());
                    }
                )*
                None
            }

            fn schema() -> $crate::core::schema::EntitySchema {
                let mut schema = $crate::core::schema::EntitySchema::new($type_name);
                schema.searchable = vec![ $( $searchable.to_string() ),* ];
                schema.categorical = vec![ $( $categorical.to_string() ),* ];
                schema.required = vec![ $( $required.to_string() ),* ];
                schema.date_field = None $( .or(Some($date_field.to_string())) )?;
                schema.rules = vec![ $( $( $rule ),* )? ];
                schema
            }

            fn tabs() -> Vec<$crate::core::predicate::Tab<Self>> {
                $tabs()
            }

            fn from_draft(
                id: Self::Id,
                draft: Self::Patch,
                now: ::chrono::DateTime<::chrono::Utc>,
            ) -> Self {
                Self {
                    id,
                    created_at: now,
                    updated_at: now,
                    $( $field: draft.$field.unwrap_or_default(), )*
                }
            }

            fn touch(&mut self, now: ::chrono::DateTime<::chrono::Utc>) {
                self.updated_at = now;
            }
        }
    };
}
