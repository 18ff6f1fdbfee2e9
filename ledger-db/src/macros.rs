/// Builder-style setters for record structs.
///
/// `setter!(payee: String)` expands to `fn payee(self, impl Into<String>) -> Self`,
/// `setter!(opt note: String)` wraps the value in `Some`.
macro_rules! setter {
    ($field:ident : $ty:ty) => {
        pub fn $field<T>(mut self, $field: T) -> Self
        where
            T: Into<$ty>,
        {
            self.$field = $field.into();
            self
        }
    };

    (opt $field:ident : $ty:ty) => {
        pub fn $field<T>(mut self, $field: T) -> Self
        where
            T: Into<$ty>,
        {
            self.$field = std::option::Option::Some($field.into());
            self
        }
    };
}

pub(crate) use setter;
