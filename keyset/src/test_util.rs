#![cfg(test)]
#![allow(missing_docs)]
use crate::type_catalog;

type_catalog! {
    #[derive(Clone, Debug, PartialEq)]
    pub enum Scalar {
        Int(i32),
        Letter(char),
        Text(String),
        Flag(bool),
    }
    #[derive(Debug)]
    pub enum ScalarRef<'a>;
}

#[derive(Clone, Debug, PartialEq)]
#[repr(C)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

type_catalog! {
    #[derive(Clone, Debug)]
    pub enum Shape {
        Point(Point),
        Coord(i32),
        Label(String),
    }
    pub enum ShapeRef<'a>;
}

macro_rules! weighted_choose {
    ($rng:expr, $($name:ident: $weight:expr => $body:expr),+) => {
        {
            enum Branches { $( $name,  )* }
            let weights = [$((Branches::$name, $weight)),+];
            match weights.choose_weighted($rng, |x| x.1).unwrap().0 {
                $(Branches::$name => $body),*
            }
        }
    }
}

pub(crate) use weighted_choose;
