//! The catalog of elementwise operations.
//!
//! Each operation binds a stable lower-case name to an [`Arity`] and a
//! pure scalar function. The scalar functions are generic over
//! [`Element`], so one definition serves both precisions.

use std::error::Error;
use std::fmt;
use std::str::FromStr;

use fieldmath_core::Element;

/// How many fields and scalars an operation consumes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Arity {
    /// `y = c`: no source field, one scalar.
    Nullary,
    /// `y = f(x)`.
    Unary,
    /// `y = h(x, p)` with `p` a plain scalar.
    UnaryWithParam,
    /// `z = g(x, y)`.
    Binary,
}

impl Arity {
    /// Number of source fields.
    pub fn source_count(self) -> usize {
        match self {
            Self::Nullary => 0,
            Self::Unary | Self::UnaryWithParam => 1,
            Self::Binary => 2,
        }
    }
}

/// Static description of one cataloged operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OpDescriptor {
    /// Stable lower-case name.
    pub name: &'static str,
    /// Arity class.
    pub arity: Arity,
    /// One-line summary.
    pub summary: &'static str,
}

/// Operations of one source field.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum UnaryOp {
    /// `-x`
    Negate,
    /// `|x|`
    Abs,
    /// Square root.
    Sqrt,
    /// `e^x`
    Exp,
    /// Natural logarithm.
    Log,
    /// Base-10 logarithm.
    Log10,
    /// Sine (radians).
    Sin,
    /// Cosine (radians).
    Cos,
    /// Tangent (radians).
    Tan,
    /// Inverse sine.
    Asin,
    /// Inverse cosine.
    Acos,
    /// Inverse tangent.
    Atan,
    /// Hyperbolic sine.
    Sinh,
    /// Hyperbolic cosine.
    Cosh,
    /// Hyperbolic tangent.
    Tanh,
    /// Identity; translates the source's sentinel into the destination's.
    Copy,
}

impl UnaryOp {
    /// Every unary operation, in catalog order.
    pub const ALL: [Self; 16] = [
        Self::Negate,
        Self::Abs,
        Self::Sqrt,
        Self::Exp,
        Self::Log,
        Self::Log10,
        Self::Sin,
        Self::Cos,
        Self::Tan,
        Self::Asin,
        Self::Acos,
        Self::Atan,
        Self::Sinh,
        Self::Cosh,
        Self::Tanh,
        Self::Copy,
    ];

    /// Stable name.
    pub fn name(self) -> &'static str {
        self.descriptor().name
    }

    /// Static description.
    pub fn descriptor(self) -> OpDescriptor {
        let (name, summary) = match self {
            Self::Negate => ("negate", "y = -x"),
            Self::Abs => ("abs", "y = |x|"),
            Self::Sqrt => ("sqrt", "y = sqrt(x)"),
            Self::Exp => ("exp", "y = e^x"),
            Self::Log => ("log", "y = ln(x)"),
            Self::Log10 => ("log10", "y = log10(x)"),
            Self::Sin => ("sin", "y = sin(x)"),
            Self::Cos => ("cos", "y = cos(x)"),
            Self::Tan => ("tan", "y = tan(x)"),
            Self::Asin => ("asin", "y = asin(x)"),
            Self::Acos => ("acos", "y = acos(x)"),
            Self::Atan => ("atan", "y = atan(x)"),
            Self::Sinh => ("sinh", "y = sinh(x)"),
            Self::Cosh => ("cosh", "y = cosh(x)"),
            Self::Tanh => ("tanh", "y = tanh(x)"),
            Self::Copy => ("copy", "y = x"),
        };
        OpDescriptor {
            name,
            arity: Arity::Unary,
            summary,
        }
    }

    /// Evaluate on one valid element.
    #[inline]
    pub fn eval<T: Element>(self, x: T) -> T {
        match self {
            Self::Negate => -x,
            Self::Abs => x.abs(),
            Self::Sqrt => x.sqrt(),
            Self::Exp => x.exp(),
            Self::Log => x.ln(),
            Self::Log10 => x.log10(),
            Self::Sin => x.sin(),
            Self::Cos => x.cos(),
            Self::Tan => x.tan(),
            Self::Asin => x.asin(),
            Self::Acos => x.acos(),
            Self::Atan => x.atan(),
            Self::Sinh => x.sinh(),
            Self::Cosh => x.cosh(),
            Self::Tanh => x.tanh(),
            Self::Copy => x,
        }
    }
}

/// Operations of two source fields.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    /// `x + y`
    Add,
    /// `x - y`
    Subtract,
    /// `x * y`
    Multiply,
    /// `x / y`; a zero divisor is a domain violation.
    Divide,
    /// Elementwise minimum.
    Min,
    /// Elementwise maximum.
    Max,
}

impl BinaryOp {
    /// Every binary operation, in catalog order.
    pub const ALL: [Self; 6] = [
        Self::Add,
        Self::Subtract,
        Self::Multiply,
        Self::Divide,
        Self::Min,
        Self::Max,
    ];

    /// Stable name.
    pub fn name(self) -> &'static str {
        self.descriptor().name
    }

    /// Static description.
    pub fn descriptor(self) -> OpDescriptor {
        let (name, summary) = match self {
            Self::Add => ("add", "z = x + y"),
            Self::Subtract => ("subtract", "z = x - y"),
            Self::Multiply => ("multiply", "z = x * y"),
            Self::Divide => ("divide", "z = x / y"),
            Self::Min => ("min", "z = min(x, y)"),
            Self::Max => ("max", "z = max(x, y)"),
        };
        OpDescriptor {
            name,
            arity: Arity::Binary,
            summary,
        }
    }

    /// Evaluate on one pair of valid elements.
    #[inline]
    pub fn eval<T: Element>(self, x: T, y: T) -> T {
        match self {
            Self::Add => x + y,
            Self::Subtract => x - y,
            Self::Multiply => x * y,
            Self::Divide => x / y,
            Self::Min => x.min(y),
            Self::Max => x.max(y),
        }
    }
}

/// Operations of one source field and one scalar parameter.
///
/// The parameter is never compared against any sentinel.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ParamOp {
    /// `x^p`; a negative base with a non-integer exponent, or zero with a
    /// negative exponent, is a domain violation.
    Pow,
    /// `x * p`
    Scale,
    /// `x + p`
    Shift,
}

impl ParamOp {
    /// Every parameterized operation, in catalog order.
    pub const ALL: [Self; 3] = [Self::Pow, Self::Scale, Self::Shift];

    /// Stable name.
    pub fn name(self) -> &'static str {
        self.descriptor().name
    }

    /// Static description.
    pub fn descriptor(self) -> OpDescriptor {
        let (name, summary) = match self {
            Self::Pow => ("pow", "y = x^p"),
            Self::Scale => ("scale", "y = x * p"),
            Self::Shift => ("shift", "y = x + p"),
        };
        OpDescriptor {
            name,
            arity: Arity::UnaryWithParam,
            summary,
        }
    }

    /// Evaluate on one valid element.
    #[inline]
    pub fn eval<T: Element>(self, x: T, p: T) -> T {
        match self {
            Self::Pow => x.powf(p),
            Self::Scale => x * p,
            Self::Shift => x + p,
        }
    }
}

/// Descriptor of the constant fill, the only nullary operation.
pub const FILL: OpDescriptor = OpDescriptor {
    name: "fill",
    arity: Arity::Nullary,
    summary: "y = c",
};

/// A fully specified operation, scalars included.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Operation {
    /// Write a constant into every element.
    Fill(f64),
    /// One source field.
    Unary(UnaryOp),
    /// One source field and a scalar parameter.
    Param(ParamOp, f64),
    /// Two source fields.
    Binary(BinaryOp),
}

impl Operation {
    /// Static description.
    pub fn descriptor(&self) -> OpDescriptor {
        match self {
            Self::Fill(_) => FILL,
            Self::Unary(op) => op.descriptor(),
            Self::Param(op, _) => op.descriptor(),
            Self::Binary(op) => op.descriptor(),
        }
    }

    /// Stable name.
    pub fn name(&self) -> &'static str {
        self.descriptor().name
    }

    /// Arity class.
    pub fn arity(&self) -> Arity {
        self.descriptor().arity
    }
}

/// Every cataloged operation, in catalog order.
pub fn catalog() -> impl Iterator<Item = OpDescriptor> {
    std::iter::once(FILL)
        .chain(UnaryOp::ALL.into_iter().map(UnaryOp::descriptor))
        .chain(ParamOp::ALL.into_iter().map(ParamOp::descriptor))
        .chain(BinaryOp::ALL.into_iter().map(BinaryOp::descriptor))
}

/// Look up a descriptor by name.
pub fn lookup(name: &str) -> Option<OpDescriptor> {
    catalog().find(|d| d.name == name)
}

/// A name that is not in the catalog (or not of the requested arity).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnknownOperation {
    /// The rejected name.
    pub name: String,
}

impl fmt::Display for UnknownOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown operation '{}'", self.name)
    }
}

impl Error for UnknownOperation {}

fn parse_from<T: Copy>(
    all: &[T],
    name_of: fn(T) -> &'static str,
    s: &str,
) -> Result<T, UnknownOperation> {
    all.iter()
        .copied()
        .find(|op| name_of(*op) == s)
        .ok_or_else(|| UnknownOperation { name: s.to_string() })
}

impl FromStr for UnaryOp {
    type Err = UnknownOperation;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_from(&Self::ALL, Self::name, s)
    }
}

impl FromStr for BinaryOp {
    type Err = UnknownOperation;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_from(&Self::ALL, Self::name, s)
    }
}

impl FromStr for ParamOp {
    type Err = UnknownOperation;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_from(&Self::ALL, Self::name, s)
    }
}
