/// Generates a Rust enum for an OCP.1 wire field with a fixed set of named
/// values, preserving unknown discriminants instead of losing them.
///
/// AES70 reserves the unassigned values of its wire enumerations (message
/// types, status codes) for future editions of the standard. A decoder must
/// therefore be able to carry an unrecognized discriminant through a
/// decode/re-encode cycle without mangling it. The generated enum has one
/// variant per named value plus a `Reserved` variant wrapping the raw value.
///
/// # Arguments
///
/// * `$name:ident` - The name of the enum to be generated.
/// * `$variant:ident = $value:expr` - A comma-separated list of named enum
///   variants and their corresponding wire values.
/// * `$unit:ident` - The underlying integer type for the enum (e.g., `u8`).
///
/// # Example
///
/// ```rust
/// use ocp1_rs::generate_wire_enum;
///
/// generate_wire_enum! {
///     Flavor {
///         Vanilla = 0,
///         Chocolate = 1,
///     },
///     u8
/// }
///
/// assert_eq!(Flavor::from(1u8), Flavor::Chocolate);
/// assert_eq!(u8::from(Flavor::Vanilla), 0);
/// assert_eq!(format!("{}", Flavor::Chocolate), "Chocolate");
///
/// // Unassigned values survive a round trip.
/// let unknown = Flavor::from(200u8);
/// if let Flavor::Reserved(value) = unknown {
///     assert_eq!(value.value(), 200);
/// } else {
///     panic!("Expected Flavor::Reserved");
/// }
/// assert_eq!(u8::from(unknown), 200);
/// ```
///
/// # Generated Code Structure
///
/// The macro generates an enum with the named variants plus
/// `Reserved([<$name Value>])` for every other value, and implements:
///
/// * `Debug`, `Clone`, `Copy`, `PartialEq`, `Eq`, `Hash` for the enum.
/// * `core::fmt::Display` - named variants display their name, reserved
///   values display as `Reserved(value)`.
/// * `From<$name> for $unit` and `From<$unit> for $name`.
#[macro_export]
macro_rules! generate_wire_enum {
    ($(#[$doc:meta])* $name:ident { $($variant:ident = $value:expr,)+ }, $unit:ident) => {
        pastey::paste! {
            $(#[$doc])*
            #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
            pub enum $name {
                $($variant,)*
                Reserved( [<$name Value>] ),
            }

            #[doc = concat!("Raw wire value carried by a reserved `", stringify!($name), "` discriminant.")]
            #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
            pub struct [<$name Value>] { value: $unit }

            impl [<$name Value>] {
                fn new(value: $unit) -> Self {
                    Self { value }
                }

                pub fn value(&self) -> $unit {
                    self.value
                }
            }

            impl core::fmt::Display for $name {
                fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                    match self {
                        $($name::$variant => write!(f, "{}", stringify!($variant)),)*
                        $name::Reserved( value ) => write!(f, "Reserved({})", value.value()),
                    }
                }
            }

            impl From<$name> for $unit {
                fn from(value: $name) -> Self {
                    match value {
                        $($name::$variant => $value,)*
                        $name::Reserved( value ) => value.value(),
                    }
                }
            }

            impl From<$unit> for $name {
                fn from(value: $unit) -> Self {
                    match value {
                        $($value => $name::$variant,)*
                        v => $name::Reserved( [<$name Value>]::new(v) ),
                    }
                }
            }
        }
    };
}
