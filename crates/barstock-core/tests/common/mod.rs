//! Scripted transport and sample inventory shared by the controller tests.

#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::VecDeque;

use barstock_core::{
    DeleteRequest, RowStore, ServerReply, Transport, TransportError, UpdateRequest,
};
use barstock_model::Row;
use barstock_model::column::{
    ABV, BOTTLE, CATEGORY, COST_PER_OZ, IN_STOCK, PRICE_PAID, SIZE_ML, SIZE_OZ, TYPE,
};

/// Replies are handed out in the order they were scripted; every request is
/// recorded.
#[derive(Default)]
pub struct ScriptedTransport {
    pub rows: Vec<Row>,
    pub updates: RefCell<Vec<UpdateRequest>>,
    pub deletes: RefCell<Vec<DeleteRequest>>,
    replies: RefCell<VecDeque<Result<ServerReply, TransportError>>>,
}

impl ScriptedTransport {
    pub fn new(rows: Vec<Row>) -> Self {
        Self {
            rows,
            ..Self::default()
        }
    }

    pub fn reply(self, reply: Result<ServerReply, TransportError>) -> Self {
        self.replies.borrow_mut().push_back(reply);
        self
    }

    pub fn request_count(&self) -> usize {
        self.updates.borrow().len() + self.deletes.borrow().len()
    }

    fn next_reply(&self) -> Result<ServerReply, TransportError> {
        self.replies
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Err(TransportError::Connection("no scripted reply".to_string())))
    }
}

impl Transport for ScriptedTransport {
    fn load(&self) -> Result<Vec<Row>, TransportError> {
        Ok(self.rows.clone())
    }

    fn update(&self, request: &UpdateRequest) -> Result<ServerReply, TransportError> {
        self.updates.borrow_mut().push(request.clone());
        self.next_reply()
    }

    fn delete(&self, request: &DeleteRequest) -> Result<ServerReply, TransportError> {
        self.deletes.borrow_mut().push(request.clone());
        self.next_reply()
    }
}

pub fn ingredient(
    category: &str,
    kind: &str,
    bottle: &str,
    abv: f64,
    size_ml: f64,
    price: f64,
) -> Row {
    let size_oz = (size_ml / 29.5735 * 10.0).round() / 10.0;
    let cost = if size_oz > 0.0 { price / size_oz } else { 0.0 };
    Row::new()
        .with(IN_STOCK, true)
        .with(CATEGORY, category)
        .with(TYPE, kind)
        .with(BOTTLE, bottle)
        .with(ABV, abv)
        .with(SIZE_ML, size_ml)
        .with(SIZE_OZ, size_oz)
        .with(PRICE_PAID, price)
        .with(COST_PER_OZ, cost)
}

pub fn inventory() -> Vec<Row> {
    vec![
        ingredient("Spirit", "Rye Whiskey", "Rittenhouse", 50.0, 750.0, 27.99),
        ingredient("Vermouth", "Sweet Vermouth", "Cocchi Torino", 16.0, 750.0, 19.0),
        ingredient("Bitters", "Aromatic Bitters", "Angostura", 44.7, 118.0, 8.5),
        ingredient("Juice", "Lime Juice", "Fresh", 0.0, 0.0, 0.0),
        ingredient("Liqueur", "Maraschino", "Luxardo", 32.0, 750.0, 33.0),
    ]
}

pub fn store() -> RowStore {
    RowStore::from_rows(inventory())
}
