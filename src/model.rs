/// Capability interface for objects handed to URL generation in place of a
/// params mapping.
///
/// `id` segments resolve through [`RouteModel::to_param`]; every other
/// segment asks [`RouteModel::field`] for a value of that name.
pub trait RouteModel {
    fn to_param(&self) -> Option<String> {
        None
    }

    fn field(&self, name: &str) -> Option<String>;
}

macro_rules! impl_numeric_model {
    ($($ty:ty),*) => {
        $(
            impl RouteModel for $ty {
                fn to_param(&self) -> Option<String> {
                    Some(self.to_string())
                }

                fn field(&self, _name: &str) -> Option<String> {
                    None
                }
            }
        )*
    };
}

impl_numeric_model!(u16, u32, u64, usize, i32, i64);
