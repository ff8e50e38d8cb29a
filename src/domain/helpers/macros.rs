/// Macro for construction of locally issued ID types using the "new type" pattern, i.e. they wrap
/// a UUID. All IDs use v7 Uuids so line items sort in the order they were created.
#[macro_export]
macro_rules! uuid_id {
    ($name:ident) => {
        #[derive(
            Clone,
            Copy,
            Debug,
            Default,
            PartialEq,
            Eq,
            PartialOrd,
            Ord,
            Hash,
            serde::Serialize,
            serde::Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(uuid::Uuid);

        impl $name {
            pub fn new() -> Self {
                $name(uuid::Uuid::now_v7())
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl fake::Dummy<fake::Faker> for $name {
            fn dummy_with_rng<R: fake::Rng + ?Sized>(_config: &fake::Faker, rng: &mut R) -> Self {
                use fake::Fake;
                let uuid: uuid::Uuid = fake::uuid::UUIDv7.fake_with_rng(rng);
                $name(uuid)
            }
        }

        impl std::str::FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let uuid = uuid::Uuid::from_str(s)?;
                Ok($name(uuid))
            }
        }

    };
}

/// Macro for ID types issued by the backend. These are opaque strings (e.g. Mongo object ids) so
/// we only guarantee they are not blank.
#[macro_export]
macro_rules! string_id {
    ($name:ident) => {
        #[derive(
            Clone,
            Debug,
            PartialEq,
            Eq,
            PartialOrd,
            Ord,
            Hash,
            serde::Serialize,
            serde::Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl fake::Dummy<fake::Faker> for $name {
            fn dummy_with_rng<R: fake::Rng + ?Sized>(_config: &fake::Faker, rng: &mut R) -> Self {
                use fake::Fake;
                let uuid: uuid::Uuid = fake::uuid::UUIDv4.fake_with_rng(rng);
                $name(uuid.simple().to_string())
            }
        }

        impl std::str::FromStr for $name {
            type Err = $crate::domain::cart::BlankId;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    Err($crate::domain::cart::BlankId(stringify!($name)))
                } else {
                    Ok($name(trimmed.to_owned()))
                }
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                $name(value.to_owned())
            }
        }
    };
}
