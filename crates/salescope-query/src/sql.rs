// SPDX-License-Identifier: Apache-2.0
//! Static SQL for every catalog operation. Limits and thresholds are always
//! bound as `?N` parameters; nothing caller-supplied is formatted into SQL.
//! Each primary ORDER BY key is followed by a tie-breaker on the grouping key.

use salescope_model::ColumnType::{self, Date, Integer, Real, Text};

pub(crate) struct TableQuery {
    pub sql: &'static str,
    pub columns: &'static [(&'static str, ColumnType)],
}

macro_rules! month_name {
    () => {
        "CASE strftime('%m', order_date)
           WHEN '01' THEN 'January' WHEN '02' THEN 'February' WHEN '03' THEN 'March'
           WHEN '04' THEN 'April' WHEN '05' THEN 'May' WHEN '06' THEN 'June'
           WHEN '07' THEN 'July' WHEN '08' THEN 'August' WHEN '09' THEN 'September'
           WHEN '10' THEN 'October' WHEN '11' THEN 'November' WHEN '12' THEN 'December'
         END"
    };
}

macro_rules! fact_projection {
    () => {
        "order_id, customer_id, customer_name, order_date, product, product_category, \
         region, city, segment, sales, profit, aging, ship_mode, shipping_cost"
    };
}

pub(crate) const TOTAL_ORDERS: TableQuery = TableQuery {
    sql: "SELECT COUNT(*) AS total_orders FROM cleaned_sales_data",
    columns: &[("total_orders", Integer)],
};

pub(crate) const SALES_AND_PROFIT: TableQuery = TableQuery {
    sql: "SELECT SUM(sales) AS total_sales, SUM(profit) AS total_profit FROM cleaned_sales_data",
    columns: &[("total_sales", Real), ("total_profit", Real)],
};

pub(crate) const SALES_BY_CATEGORY: TableQuery = TableQuery {
    sql: "SELECT product_category, SUM(sales) AS sales
          FROM cleaned_sales_data
          GROUP BY product_category
          ORDER BY SUM(sales) DESC, product_category ASC",
    columns: &[("product_category", Text), ("sales", Real)],
};

pub(crate) const SALES_BY_REGION: TableQuery = TableQuery {
    sql: "SELECT region, SUM(sales) AS sales
          FROM cleaned_sales_data
          GROUP BY region
          ORDER BY SUM(sales) DESC, region ASC",
    columns: &[("region", Text), ("sales", Real)],
};

pub(crate) const MONTHLY_SALES: TableQuery = TableQuery {
    sql: concat!(
        "SELECT ",
        month_name!(),
        " AS month, SUM(sales) AS sales
          FROM cleaned_sales_data
          GROUP BY strftime('%m', order_date)
          ORDER BY strftime('%m', order_date) ASC"
    ),
    columns: &[("month", Text), ("sales", Real)],
};

pub(crate) const YEARLY_SALES: TableQuery = TableQuery {
    sql: "SELECT strftime('%Y', order_date) AS year, SUM(sales) AS sales
          FROM cleaned_sales_data
          GROUP BY strftime('%Y', order_date)
          ORDER BY strftime('%Y', order_date) ASC",
    columns: &[("year", Text), ("sales", Real)],
};

pub(crate) const BEST_PRODUCTS: TableQuery = TableQuery {
    sql: "SELECT product, SUM(sales) AS total_sales
          FROM cleaned_sales_data
          GROUP BY product
          ORDER BY SUM(sales) DESC, product ASC
          LIMIT ?1",
    columns: &[("product", Text), ("total_sales", Real)],
};

pub(crate) const WORST_PRODUCTS: TableQuery = TableQuery {
    sql: "SELECT product, SUM(sales) AS total_sales
          FROM cleaned_sales_data
          GROUP BY product
          ORDER BY SUM(sales) ASC, product ASC
          LIMIT ?1",
    columns: &[("product", Text), ("total_sales", Real)],
};

pub(crate) const TOP_CUSTOMERS: TableQuery = TableQuery {
    sql: "SELECT customer_id, MAX(customer_name) AS customer_name, SUM(sales) AS total_sales
          FROM cleaned_sales_data
          GROUP BY customer_id
          ORDER BY SUM(sales) DESC, customer_id ASC
          LIMIT ?1",
    columns: &[("customer_id", Text), ("customer_name", Text), ("total_sales", Real)],
};

pub(crate) const PROFIT_BY_PRODUCT: TableQuery = TableQuery {
    sql: "SELECT product, SUM(profit) AS profit
          FROM cleaned_sales_data
          GROUP BY product
          ORDER BY SUM(profit) DESC, product ASC",
    columns: &[("product", Text), ("profit", Real)],
};

pub(crate) const PROFIT_BY_SEGMENT: TableQuery = TableQuery {
    sql: "SELECT segment, SUM(profit) AS segment_profit
          FROM cleaned_sales_data
          GROUP BY segment
          ORDER BY SUM(profit) DESC, segment ASC",
    columns: &[("segment", Text), ("segment_profit", Real)],
};

pub(crate) const RFM_RECENCY: TableQuery = TableQuery {
    sql: "SELECT customer_id, MAX(customer_name) AS customer_name, MAX(order_date) AS last_order_date
          FROM cleaned_sales_data
          GROUP BY customer_id
          ORDER BY customer_id ASC",
    columns: &[("customer_id", Text), ("customer_name", Text), ("last_order_date", Date)],
};

pub(crate) const RFM_FREQUENCY: TableQuery = TableQuery {
    sql: "SELECT customer_id, MAX(customer_name) AS customer_name, COUNT(order_id) AS total_orders
          FROM cleaned_sales_data
          GROUP BY customer_id
          ORDER BY customer_id ASC",
    columns: &[("customer_id", Text), ("customer_name", Text), ("total_orders", Integer)],
};

pub(crate) const RFM_MONETARY: TableQuery = TableQuery {
    sql: "SELECT customer_id, MAX(customer_name) AS customer_name, SUM(sales) AS total_sales
          FROM cleaned_sales_data
          GROUP BY customer_id
          ORDER BY customer_id ASC",
    columns: &[("customer_id", Text), ("customer_name", Text), ("total_sales", Real)],
};

pub(crate) const SEASONAL_DEMAND: TableQuery = TableQuery {
    sql: concat!(
        "SELECT ",
        month_name!(),
        " AS months, COUNT(order_id) AS orders, SUM(sales) AS sales
          FROM cleaned_sales_data
          GROUP BY strftime('%m', order_date)
          ORDER BY SUM(sales) DESC, strftime('%m', order_date) ASC"
    ),
    columns: &[("months", Text), ("orders", Integer), ("sales", Real)],
};

pub(crate) const PRODUCT_PERFORMANCE_TREND: TableQuery = TableQuery {
    sql: "SELECT product, strftime('%Y-%m', order_date) AS month, SUM(sales) AS monthly_sales
          FROM cleaned_sales_data
          GROUP BY product, strftime('%Y-%m', order_date)
          ORDER BY product ASC, strftime('%Y-%m', order_date) ASC",
    columns: &[("product", Text), ("month", Text), ("monthly_sales", Real)],
};

pub(crate) const MONTHLY_SALES_FORECAST_INPUT: TableQuery = TableQuery {
    sql: "SELECT strftime('%Y-%m', order_date) AS month, SUM(sales) AS monthly_sales
          FROM cleaned_sales_data
          GROUP BY strftime('%Y-%m', order_date)
          ORDER BY strftime('%Y-%m', order_date) ASC",
    columns: &[("month", Text), ("monthly_sales", Real)],
};

const FACT_COLUMNS: &[(&str, ColumnType)] = &[
    ("order_id", Text),
    ("customer_id", Text),
    ("customer_name", Text),
    ("order_date", Date),
    ("product", Text),
    ("product_category", Text),
    ("region", Text),
    ("city", Text),
    ("segment", Text),
    ("sales", Real),
    ("profit", Real),
    ("aging", Integer),
    ("ship_mode", Text),
    ("shipping_cost", Real),
];

pub(crate) const HIGH_RISK_LOW_PROFIT: TableQuery = TableQuery {
    sql: concat!(
        "SELECT ",
        fact_projection!(),
        " FROM cleaned_sales_data
          WHERE profit < 0
          ORDER BY profit ASC, order_id ASC, rowid ASC"
    ),
    columns: FACT_COLUMNS,
};

/// ?1 = risk_min_aging_days
pub(crate) const HIGH_RISK_HIGH_AGING: TableQuery = TableQuery {
    sql: concat!(
        "SELECT ",
        fact_projection!(),
        " FROM cleaned_sales_data
          WHERE aging > ?1
          ORDER BY aging DESC, order_id ASC, rowid ASC"
    ),
    columns: FACT_COLUMNS,
};

/// ?1 = discount_max_sales, ?2 = discount_max_profit
pub(crate) const PRODUCTS_TO_DISCOUNT: TableQuery = TableQuery {
    sql: "SELECT product, SUM(sales) AS sales, SUM(profit) AS profit
          FROM cleaned_sales_data
          GROUP BY product
          HAVING SUM(sales) < ?1 AND SUM(profit) < ?2
          ORDER BY SUM(sales) ASC, SUM(profit) ASC, product ASC",
    columns: &[("product", Text), ("sales", Real), ("profit", Real)],
};

/// ?1 = promote_min_sales, ?2 = promote_min_profit
pub(crate) const PRODUCTS_TO_PROMOTE: TableQuery = TableQuery {
    sql: "SELECT product, SUM(sales) AS sales, SUM(profit) AS profit
          FROM cleaned_sales_data
          GROUP BY product
          HAVING SUM(sales) > ?1 AND SUM(profit) > ?2
          ORDER BY SUM(profit) DESC, product ASC",
    columns: &[("product", Text), ("sales", Real), ("profit", Real)],
};

/// ?1 = loyalty_min_sales, ?2 = loyalty_min_orders
pub(crate) const LOYAL_CUSTOMERS: TableQuery = TableQuery {
    sql: "SELECT customer_id, MAX(customer_name) AS customer_name,
                 SUM(sales) AS total_sales, COUNT(order_id) AS total_orders
          FROM cleaned_sales_data
          GROUP BY customer_id
          HAVING SUM(sales) > ?1 OR COUNT(order_id) > ?2
          ORDER BY SUM(sales) DESC, customer_id ASC",
    columns: &[
        ("customer_id", Text),
        ("customer_name", Text),
        ("total_sales", Real),
        ("total_orders", Integer),
    ],
};

pub(crate) const CHURNING_CUSTOMERS: TableQuery = TableQuery {
    sql: "SELECT customer_id, MAX(customer_name) AS customer_name, MAX(order_date) AS last_order
          FROM cleaned_sales_data
          GROUP BY customer_id
          ORDER BY MAX(order_date) ASC, customer_id ASC",
    columns: &[("customer_id", Text), ("customer_name", Text), ("last_order", Date)],
};

pub(crate) const LOGISTICS_BY_CITY: TableQuery = TableQuery {
    sql: "SELECT city, AVG(aging) AS avg_delivery_delay
          FROM cleaned_sales_data
          GROUP BY city
          ORDER BY AVG(aging) DESC, city ASC",
    columns: &[("city", Text), ("avg_delivery_delay", Real)],
};

pub(crate) const SHIPPING_MODE_OPTIMIZATION: TableQuery = TableQuery {
    sql: "SELECT ship_mode, AVG(aging) AS avg_delivery_days, SUM(shipping_cost) AS total_cost
          FROM cleaned_sales_data
          GROUP BY ship_mode
          ORDER BY AVG(aging) DESC, ship_mode ASC",
    columns: &[("ship_mode", Text), ("avg_delivery_days", Real), ("total_cost", Real)],
};
