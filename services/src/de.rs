use serde::{
    Deserialize,
    Deserializer,
};


/// Treats an explicit `null` the same as a missing field.
///
/// Spotify sends `null` for ids and uris of local files, and occasionally for nested arrays.
pub fn null_as_default<'de, D, T>(de: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Option::<T>::deserialize(de).map(Option::unwrap_or_default)
}
