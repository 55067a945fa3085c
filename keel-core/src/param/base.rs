//! Base implementation of parameter sets.
use crate::error::KeelError;
use ndarray::{ArrayD, IxDyn};
use num_traits::AsPrimitive;
use serde::{Deserialize, Serialize};

/// A named, ordered collection of parameter tensors.
///
/// Entries keep their insertion order and names are unique within a set.
/// Two sets correspond when they have the same names in the same order and
/// the tensors under each name have the same shape; [`soft_update`] and
/// [`copy_from`] require correspondence.
///
/// ```rust
/// use keel_core::param::{tensor_from_vec, ParamSet};
///
/// let mut params = ParamSet::new();
/// params.push("w", tensor_from_vec(vec![0.1f32, 0.2], &[2]).unwrap()).unwrap();
/// params.push("b", tensor_from_vec(vec![0.0f32], &[1]).unwrap()).unwrap();
/// assert_eq!(params.len(), 2);
/// ```
///
/// [`soft_update`]: crate::param::soft_update
/// [`copy_from`]: crate::param::copy_from
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ParamSet {
    entries: Vec<(String, ArrayD<f32>)>,
}

impl ParamSet {
    /// Creates an empty parameter set.
    pub fn new() -> Self {
        Self { entries: vec![] }
    }

    /// The number of tensors in the set.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the set has no tensors.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Appends a named tensor to the set.
    ///
    /// Fails with [`KeelError::DuplicateParam`] if the name is taken.
    pub fn push(&mut self, name: impl Into<String>, tensor: ArrayD<f32>) -> Result<(), KeelError> {
        let name = name.into();
        if self.entries.iter().any(|(n, _)| n == &name) {
            return Err(KeelError::DuplicateParam(name));
        }
        self.entries.push((name, tensor));
        Ok(())
    }

    /// Returns the tensor with the given name.
    pub fn get(&self, name: &str) -> Option<&ArrayD<f32>> {
        self.entries
            .iter()
            .find(|(n, _)| n.as_str() == name)
            .map(|(_, t)| t)
    }

    /// Returns the tensor with the given name, mutably.
    pub fn get_mut(&mut self, name: &str) -> Option<&mut ArrayD<f32>> {
        self.entries
            .iter_mut()
            .find(|e| e.0 == name)
            .map(|e| &mut e.1)
    }

    /// Iterates over the entries in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, (String, ArrayD<f32>)> {
        self.entries.iter()
    }

    /// Iterates over the names in insertion order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(n, _)| n.as_str())
    }

    /// Iterates over the tensors in insertion order.
    pub fn values(&self) -> impl Iterator<Item = &ArrayD<f32>> {
        self.entries.iter().map(|(_, t)| t)
    }

    /// Iterates over the tensors in insertion order, mutably.
    ///
    /// Names are not exposed here; they stay fixed for the lifetime of the
    /// entry.
    pub fn values_mut(&mut self) -> impl Iterator<Item = &mut ArrayD<f32>> {
        self.entries.iter_mut().map(|(_, t)| t)
    }
}

impl Default for ParamSet {
    fn default() -> Self {
        Self::new()
    }
}

/// Builds a tensor of the given shape from a flat vector.
///
/// The element type is converted to `f32`. Fails with
/// [`KeelError::ShapeMismatch`] when the number of elements does not fill
/// the shape.
pub fn tensor_from_vec<T>(data: Vec<T>, shape: &[usize]) -> Result<ArrayD<f32>, KeelError>
where
    T: AsPrimitive<f32>,
{
    let len: usize = shape.iter().product();
    if data.len() != len {
        return Err(KeelError::ShapeMismatch(format!(
            "{} elements do not fill shape {:?}",
            data.len(),
            shape
        )));
    }
    let data = data.iter().map(|e| e.as_()).collect::<Vec<_>>();
    ArrayD::from_shape_vec(IxDyn(shape), data).map_err(|e| KeelError::ShapeMismatch(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::{tensor_from_vec, ParamSet};
    use crate::error::KeelError;

    #[test]
    fn test_push_and_get() -> Result<(), KeelError> {
        let mut params = ParamSet::new();
        assert!(params.is_empty());

        params.push("w", tensor_from_vec(vec![1.0f32, 2.0], &[2])?)?;
        params.push("b", tensor_from_vec(vec![0.5f32], &[1])?)?;

        assert_eq!(params.len(), 2);
        assert_eq!(params.names().collect::<Vec<_>>(), vec!["w", "b"]);
        assert_eq!(params.get("b").unwrap()[[0]], 0.5);
        assert!(params.get("missing").is_none());
        Ok(())
    }

    #[test]
    fn test_duplicate_name() -> Result<(), KeelError> {
        let mut params = ParamSet::new();
        params.push("w", tensor_from_vec(vec![1.0f32], &[1])?)?;
        let err = params
            .push("w", tensor_from_vec(vec![2.0f32], &[1])?)
            .unwrap_err();
        assert!(matches!(err, KeelError::DuplicateParam(_)));
        assert_eq!(params.len(), 1);
        Ok(())
    }

    #[test]
    fn test_tensor_from_vec() -> Result<(), KeelError> {
        let t = tensor_from_vec(vec![1u8, 2, 3, 4, 5, 6], &[2, 3])?;
        assert_eq!(t.shape(), &[2, 3]);
        assert_eq!(t[[1, 2]], 6.0);

        let err = tensor_from_vec(vec![0.0f32; 5], &[2, 3]).unwrap_err();
        assert!(matches!(err, KeelError::ShapeMismatch(_)));
        Ok(())
    }

    #[test]
    fn test_serialize_roundtrip() -> Result<(), KeelError> {
        let mut params = ParamSet::new();
        params.push("w", tensor_from_vec(vec![1.0f32, -2.0, 3.0], &[3])?)?;
        params.push("b", tensor_from_vec(vec![0.0f32], &[1])?)?;

        let bytes = bincode::serialize(&params).unwrap();
        let restored: ParamSet = bincode::deserialize(&bytes).unwrap();
        assert_eq!(params, restored);
        Ok(())
    }
}
